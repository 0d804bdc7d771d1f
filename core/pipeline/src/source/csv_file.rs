//! FILENAME: core/pipeline/src/source/csv_file.rs
//! PURPOSE: Data source backed by a headed CSV export of the ledger.
//! CONTEXT: The file is opened on every fetch and closed when the fetch
//! returns, the same lifecycle a database connection would have. Cell types
//! are inferred from the text so dates and amounts export as typed cells.

use super::{select_record, DataSource, FetchResult};
use crate::error::FetchError;
use crate::log_debug;
use chrono::{NaiveDate, NaiveDateTime};
use engine::{Value, DATETIME_FORMAT, DATE_FORMAT};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    date_column: String,
    delimiter: u8,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, date_column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            date_column: date_column.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for CsvSource {
    fn fetch(&mut self, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, FetchError> {
        if !self.path.is_file() {
            return Err(FetchError::Connection(format!(
                "file not found: {}",
                self.path.display()
            )));
        }

        // Ragged lines are let through so the schema check reports them,
        // whatever their date
        let mut rdr = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)?;

        let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let date_idx = columns
            .iter()
            .position(|c| *c == self.date_column)
            .ok_or_else(|| {
                FetchError::Query(format!("date column '{}' not found", self.date_column))
            })?;

        let width = columns.len();
        let mut rows = Vec::new();
        let mut scanned = 0usize;
        for result in rdr.records() {
            let record = result?;
            scanned += 1;
            let row: Vec<Value> = record.iter().map(infer_value).collect();
            let keep = select_record(&row, width, date_idx, start, end).map_err(|e| match e {
                FetchError::Query(msg) => FetchError::Query(format!(
                    "{} line {}: {}",
                    self.path.display(),
                    record.position().map(|p| p.line()).unwrap_or(0),
                    msg
                )),
                other => other,
            })?;
            if keep {
                rows.push(row);
            }
        }

        log_debug!(
            "SOURCE",
            "csv {} scanned={} kept={}",
            self.path.display(),
            scanned,
            rows.len()
        );

        Ok(FetchResult { columns, rows })
    }
}

/// Types a CSV field: dates, integers and decimals are recognised, an empty
/// field is null, anything else stays text.
pub(crate) fn infer_value(field: &str) -> Value {
    let s = field.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Value::Date(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Value::DateTime(dt);
    }
    if looks_numeric(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(n) = s.parse::<f64>() {
            return Value::Number(n);
        }
    }
    Value::Text(field.to_string())
}

/// Plain decimal notation only. Codes with leading zeros ("007") stay text.
fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return false;
    }
    if digits.matches('.').count() > 1 || digits.starts_with('.') || digits.ends_with('.') {
        return false;
    }
    !(digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0."))
}
