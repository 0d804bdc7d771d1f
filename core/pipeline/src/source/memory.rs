//! FILENAME: core/pipeline/src/source/memory.rs

use super::{select_record, DataSource, FetchResult};
use crate::error::FetchError;
use chrono::NaiveDate;
use engine::Value;

/// A table held in memory, filtered by period on each fetch.
/// Useful for hosts that already have the ledger loaded, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    date_column: String,
}

impl MemorySource {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>, date_column: impl Into<String>) -> Self {
        Self {
            columns,
            rows,
            date_column: date_column.into(),
        }
    }

    pub fn push(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DataSource for MemorySource {
    fn fetch(&mut self, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, FetchError> {
        let date_idx = self
            .columns
            .iter()
            .position(|c| *c == self.date_column)
            .ok_or_else(|| {
                FetchError::Query(format!("date column '{}' not found", self.date_column))
            })?;

        let width = self.columns.len();
        let mut rows = Vec::new();
        for row in &self.rows {
            if select_record(row, width, date_idx, start, end)? {
                rows.push(row.clone());
            }
        }

        Ok(FetchResult {
            columns: self.columns.clone(),
            rows,
        })
    }
}
