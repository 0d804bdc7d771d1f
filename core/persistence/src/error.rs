//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

/// Failure while writing or reading back a report.
/// Nothing is retried here; the caller decides whether to export again.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Report too large: {0}")]
    TooLarge(String),
}
