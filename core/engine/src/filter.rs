//! FILENAME: core/engine/src/filter.rs
//! PURPOSE: Per-column text filters and the engine that applies them to a result set.
//! CONTEXT: Every column is filtered the same way: the rendered value and the
//! filter text are lower-cased and the record is kept when the filter text is
//! a substring of the value. Several active filters combine with AND.
//!
//! Date columns are NOT compared as dates. A filter of `2024-01` on a date
//! column keeps every record whose rendered date contains `2024-01`, i.e. all
//! of January 2024. There is no range comparison; callers wanting "between"
//! semantics should narrow the fetch period instead.

use crate::error::EngineError;
use crate::result_set::{Record, ResultSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// FILTER SPEC
// ============================================================================

/// Filter text per column name.
/// Columns that are absent or hold blank text impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    filters: BTreeMap<String, String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `set`.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Sets the filter text for a column, replacing any previous text.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(column.into(), value.into());
    }

    pub fn remove(&mut self, column: &str) -> Option<String> {
        self.filters.remove(column)
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.filters.get(column).map(String::as_str)
    }

    /// All columns named by this filter, including those with blank text.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Columns that actually constrain, with their trimmed filter text.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .map(|(col, value)| (col.as_str(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }

    /// True when no column carries non-blank filter text.
    pub fn is_identity(&self) -> bool {
        self.active().next().is_none()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut spec = FilterSpec::new();
        for (column, value) in iter {
            spec.set(column, value);
        }
        spec
    }
}

// ============================================================================
// FILTER LOGIC
// ============================================================================

/// A resolved filter: column position plus the lower-cased needle.
struct ColumnMatcher {
    index: usize,
    needle: String,
}

impl ColumnMatcher {
    fn matches(&self, record: &Record) -> bool {
        record
            .get(self.index)
            .map(|value| value.render().to_lowercase().contains(&self.needle))
            .unwrap_or(false)
    }
}

/// Resolves every filtered column against the set's columns.
/// Blank filters are checked for existence too, then dropped.
fn resolve(set: &ResultSet, spec: &FilterSpec) -> Result<Vec<ColumnMatcher>, EngineError> {
    for column in spec.columns() {
        if set.column_index(column).is_none() {
            return Err(EngineError::UnknownColumn(column.to_string()));
        }
    }

    Ok(spec
        .active()
        .filter_map(|(column, value)| {
            set.column_index(column).map(|index| ColumnMatcher {
                index,
                needle: value.to_lowercase(),
            })
        })
        .collect())
}

/// Applies `spec` to `set` and returns a new set holding the matching records
/// in their original order. `set` itself is left untouched.
///
/// # Errors
/// `EngineError::UnknownColumn` if `spec` names a column `set` does not have.
pub fn apply(set: &ResultSet, spec: &FilterSpec) -> Result<ResultSet, EngineError> {
    let matchers = resolve(set, spec)?;

    let rows: Vec<Record> = set
        .rows()
        .iter()
        .filter(|record| matchers.iter().all(|m| m.matches(record)))
        .cloned()
        .collect();

    Ok(set.derive(rows))
}

/// Returns the unfiltered set `set` was derived from.
/// Equivalent to applying an empty spec to that original.
pub fn reset(set: &ResultSet) -> ResultSet {
    set.original()
}
