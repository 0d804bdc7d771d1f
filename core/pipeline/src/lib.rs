//! FILENAME: core/pipeline/src/lib.rs
//! PURPOSE: Main library entry point for the casalenta export pipeline.
//! CONTEXT: Wires a `DataSource` to the result set engine and the report
//! writer behind a small state machine (`PipelineController`). A presentation
//! layer renders `controller.active()` and calls load / apply_filter /
//! reset_filter / export in response to the user.

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod logging;
pub mod source;

// Used by the logging macros
#[doc(hidden)]
pub use log;

pub use config::PipelineConfig;
pub use controller::{LoadOutcome, PipelineController, PipelineState};
pub use error::{ConfigError, FetchError, InputError, PipelineError};
pub use input::{collect_filters, parse_period, FilterInput, Period};
pub use logging::init_logging;
pub use source::{
    CsvSource, DataSource, FetchResult, MemorySource, CASALENTA_COLUMNS, CASALENTA_DATE_COLUMN,
};

pub use engine::{FilterSpec, ResultSet, Value};
pub use persistence::{read_report, ReportArtifact, ReportOptions, DEFAULT_REPORT_NAME};
