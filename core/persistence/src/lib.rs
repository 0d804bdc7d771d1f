//! FILENAME: core/persistence/src/lib.rs
//! Casalenta Report Module
//!
//! Writes a result set to a single-sheet XLSX report and reads such a report
//! back for verification.

mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use error::ExportError;
pub use xlsx_reader::read_report;
pub use xlsx_writer::ReportBuilder;

use engine::{ResultSet, Value};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// DEFAULTS
// ============================================================================

/// File name used when the caller does not pick a destination.
/// Every export overwrites it.
pub const DEFAULT_REPORT_NAME: &str = "raport_casalenta.xlsx";

/// Title of the only worksheet in a report.
pub const DEFAULT_SHEET_NAME: &str = "Raport Casalenta";

/// Largest integer magnitude a worksheet number holds exactly (2^53).
pub const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Excel grid limits.
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;

// ============================================================================
// REPORT OPTIONS
// ============================================================================

/// Layout knobs for the report writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub sheet_name: String,
    /// Excel number format applied to date cells
    pub date_format: String,
    /// Excel number format applied to date-time cells
    pub datetime_format: String,
    pub bold_header: bool,
    /// Size columns to their content after writing
    pub autofit: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            date_format: "yyyy-mm-dd".to_string(),
            datetime_format: "yyyy-mm-dd hh:mm:ss".to_string(),
            bold_header: true,
            autofit: true,
        }
    }
}

// ============================================================================
// REPORT ARTIFACT
// ============================================================================

/// Describes a report that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub path: PathBuf,
    pub sheet_name: String,
    pub column_count: usize,
    /// Data rows, header excluded
    pub row_count: usize,
}

// ============================================================================
// REPORT CONTENTS
// ============================================================================

/// First worksheet of a report as read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContents {
    pub sheet_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ReportContents {
    /// Rebuilds a result set from the header and data rows.
    pub fn into_result_set(self) -> Result<ResultSet, ExportError> {
        ResultSet::new(self.header, self.rows).map_err(|e| ExportError::InvalidFormat(e.to_string()))
    }
}
