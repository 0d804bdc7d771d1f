//! FILENAME: core/pipeline/src/error.rs

use engine::EngineError;
use persistence::ExportError;
use thiserror::Error;

/// Failure reported by a data source. The user may simply load again.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected period text from the presentation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be YYYY-MM-DD, got '{value}'")]
    BadDate { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The operation needs loaded data and the controller is idle.
    #[error("No data loaded: {0} needs a loaded result set")]
    NotLoaded(&'static str),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<EngineError> for PipelineError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Schema(msg) => PipelineError::Schema(msg),
            EngineError::UnknownColumn(column) => PipelineError::UnknownColumn(column),
        }
    }
}
