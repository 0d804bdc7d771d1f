//! FILENAME: core/pipeline/src/source/mod.rs
//! PURPOSE: The seam between the pipeline and whatever holds the transactions.
//! CONTEXT: A source answers one question: which records fall in a period.
//! It owns its connection and opens/closes it around each fetch. The
//! pipeline never validates `start <= end`; sources apply SQL `BETWEEN`
//! semantics, so a reversed period simply yields no records.

mod csv_file;
mod memory;

pub use self::csv_file::CsvSource;
pub use self::memory::MemorySource;

use crate::error::FetchError;
use chrono::NaiveDate;
use engine::Value;

/// Columns of the casalenta ledger table, in query order.
pub const CASALENTA_COLUMNS: [&str; 4] = ["DATA", "SUMA_PRIM", "PAY_TYPE", "CASA"];

/// Column holding the transaction date.
pub const CASALENTA_DATE_COLUMN: &str = "DATA";

/// Raw result of a fetch, before schema checks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

pub trait DataSource {
    /// Returns the records dated within `[start, end]`, in source order.
    fn fetch(&mut self, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, FetchError>;
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn fetch(&mut self, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, FetchError> {
        (**self).fetch(start, end)
    }
}

impl<S: DataSource + ?Sized> DataSource for &mut S {
    fn fetch(&mut self, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, FetchError> {
        (**self).fetch(start, end)
    }
}

/// Decides whether a fetched record belongs to the period.
///
/// A record whose width differs from the header is always kept so the schema
/// check rejects it. A null date never matches, as with SQL `BETWEEN`. Any
/// other value that is not a date fails the fetch.
pub(crate) fn select_record(
    row: &[Value],
    width: usize,
    date_idx: usize,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<bool, FetchError> {
    if row.len() != width {
        return Ok(true);
    }
    match &row[date_idx] {
        Value::Null => Ok(false),
        value if value.as_date().is_some() => Ok(in_period(value, start, end)),
        other => Err(FetchError::Query(format!(
            "'{}' is not a date",
            other.render()
        ))),
    }
}

/// Inclusive period test on a record's date field.
/// Records whose date field is empty or not a date never match.
pub(crate) fn in_period(value: &Value, start: NaiveDate, end: NaiveDate) -> bool {
    value
        .as_date()
        .map(|d| start <= d && d <= end)
        .unwrap_or(false)
}
