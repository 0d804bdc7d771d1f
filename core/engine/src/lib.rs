//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the result set engine.
//! CONTEXT: Holds the in-memory model of a fetched period (`ResultSet`) and
//! the column filter engine. Pure data and functions, no I/O.

pub mod error;
pub mod filter;
pub mod result_set;
pub mod value;

// Re-export commonly used types at the crate root
pub use error::EngineError;
pub use filter::{apply, reset, FilterSpec};
pub use result_set::{Record, ResultSet};
pub use value::{Value, DATETIME_FORMAT, DATE_FORMAT};
