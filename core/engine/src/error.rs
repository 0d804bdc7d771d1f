//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A record does not line up with the column list, or a column name repeats.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A filter names a column the result set does not have.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}
