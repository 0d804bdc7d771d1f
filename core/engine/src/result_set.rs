//! FILENAME: core/engine/src/result_set.rs
//! PURPOSE: Immutable snapshot of fetched records plus their ordered column names.
//! CONTEXT: A `ResultSet` is created once from a fetch and never mutated.
//! Filtering produces a new `ResultSet` that shares record storage with its
//! source and remembers the original rows, so a reset can hand the
//! unfiltered set back without another fetch. All storage sits behind `Arc`,
//! which makes clones cheap and lets any number of readers hold the same set.

use crate::error::EngineError;
use crate::value::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// A single record, positionally aligned to the result set's columns.
pub type Record = Arc<[Value]>;

#[derive(Debug, Clone)]
pub struct ResultSet {
    columns: Arc<[String]>,
    rows: Arc<[Record]>,
    /// Rows of the unfiltered set this one was derived from.
    /// None when this set is itself an original.
    origin: Option<Arc<[Record]>>,
}

impl ResultSet {
    /// Builds a result set from a fetch.
    /// Fails if a column name repeats or a record length differs from the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, EngineError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(EngineError::Schema(format!("duplicate column '{}'", name)));
            }
        }

        let width = columns.len();
        let mut records: Vec<Record> = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::Schema(format!(
                    "record {} has {} values, expected {}",
                    idx,
                    row.len(),
                    width
                )));
            }
            records.push(Arc::from(row));
        }

        Ok(ResultSet {
            columns: Arc::from(columns),
            rows: Arc::from(records),
            origin: None,
        })
    }

    /// A result set with the given columns and no records.
    pub fn empty(columns: Vec<String>) -> Result<Self, EngineError> {
        Self::new(columns, Vec::new())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.rows.get(row)
    }

    /// Value at (row, column), both 0-based.
    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// True when this set was produced by a filter rather than a fetch.
    pub fn is_derived(&self) -> bool {
        self.origin.is_some()
    }

    /// New set with the same columns and the given subset of records.
    /// The origin always points at the first, unfiltered rows.
    pub(crate) fn derive(&self, rows: Vec<Record>) -> Self {
        ResultSet {
            columns: Arc::clone(&self.columns),
            rows: Arc::from(rows),
            origin: Some(self.origin.clone().unwrap_or_else(|| Arc::clone(&self.rows))),
        }
    }

    /// The unfiltered set this one descends from (itself if it is an original).
    pub(crate) fn original(&self) -> Self {
        ResultSet {
            columns: Arc::clone(&self.columns),
            rows: self.origin.clone().unwrap_or_else(|| Arc::clone(&self.rows)),
            origin: None,
        }
    }
}

/// Two sets are equal when they have the same columns and the same records in
/// the same order. Where a set was derived from does not matter.
impl PartialEq for ResultSet {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.rows == other.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_validates_record_width() {
        let err = ResultSet::new(
            cols(&["DATA", "SUMA_PRIM"]),
            vec![
                vec![Value::text("2024-01-05"), Value::Integer(1)],
                vec![Value::text("2024-01-06")],
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            EngineError::Schema("record 1 has 1 values, expected 2".to_string())
        );
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let err = ResultSet::new(cols(&["CASA", "CASA"]), Vec::new()).unwrap_err();
        assert!(matches!(err, EngineError::Schema(_)));
    }

    #[test]
    fn test_accessors() {
        let set = ResultSet::new(
            cols(&["PAY_TYPE", "CASA"]),
            vec![
                vec![Value::text("CARD"), Value::Integer(1)],
                vec![Value::text("CASH"), Value::Integer(2)],
            ],
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.column_count(), 2);
        assert_eq!(set.column_index("CASA"), Some(1));
        assert_eq!(set.column_index("casa"), None);
        assert_eq!(set.value(1, 0), Some(&Value::text("CASH")));
        assert_eq!(set.value(2, 0), None);
        assert!(!set.is_derived());
    }

    #[test]
    fn test_empty_set_is_valid() {
        let set = ResultSet::empty(cols(&["DATA"])).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.columns(), &["DATA".to_string()]);
    }

    #[test]
    fn test_derive_keeps_first_origin() {
        let set = ResultSet::new(
            cols(&["N"]),
            (0..4).map(|i| vec![Value::Integer(i)]).collect(),
        )
        .unwrap();

        let first = set.derive(set.rows()[1..].to_vec());
        let second = first.derive(first.rows()[1..].to_vec());

        assert_eq!(second.len(), 2);
        assert!(second.is_derived());
        assert_eq!(second.original(), set);
        assert!(!second.original().is_derived());
    }
}
