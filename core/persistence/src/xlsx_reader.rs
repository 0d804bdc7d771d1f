// FILENAME: core/persistence/src/xlsx_reader.rs

use crate::{ExportError, ReportContents, MAX_EXACT_INTEGER};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use engine::Value;
use std::path::Path;

/// Reads the first worksheet of a report.
///
/// Row 1 becomes the header, every following row a record padded or cut to
/// the header width. Trailing records with no values are restored from the
/// sheet dimension.
///
/// The file does not say which Value variant a cell came from, so:
/// - numbers without a fractional part come back as `Value::Integer`;
/// - text holding an integer beyond 2^53 comes back as `Value::Integer`;
/// - empty text is stored as a blank cell and comes back as `Value::Null`;
/// - date cells at midnight come back as `Value::Date`, even when they were
///   written from a `Value::DateTime` at 00:00:00.
pub fn read_report(path: impl AsRef<Path>) -> Result<ReportContents, ExportError> {
    let mut workbook: Xlsx<_> = open_workbook(path.as_ref())?;

    let sheet_name = workbook.sheet_names().first().cloned().ok_or_else(|| {
        ExportError::InvalidFormat("Workbook contains no sheets".to_string())
    })?;

    // The used range skips empty cells, the dimension does not
    let last_row = workbook
        .worksheet_cells_reader(&sheet_name)?
        .dimensions()
        .end
        .0;

    let range = workbook.worksheet_range(&sheet_name)?;
    let header_row = range.start().map(|(row, _)| row).unwrap_or(0);
    let mut rows = range.rows();

    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(header_text).collect(),
        None => Vec::new(),
    };

    let width = header.len();
    let mut records: Vec<Vec<Value>> = rows
        .map(|cells| {
            let mut record: Vec<Value> = cells.iter().take(width).map(cell_value).collect();
            record.resize(width, Value::Null);
            record
        })
        .collect();

    let expected = last_row.saturating_sub(header_row) as usize;
    if width > 0 && records.len() < expected {
        records.resize(expected, vec![Value::Null; width]);
    }

    Ok(ReportContents {
        sheet_name,
        header,
        rows: records,
    })
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => wide_integer(s).unwrap_or_else(|| Value::Text(s.clone())),
        Data::Int(i) => Value::Integer(*i),
        Data::Float(f) => number_value(*f),
        Data::Bool(b) => Value::Boolean(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(at) => temporal_value(at),
            None => number_value(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s).unwrap_or_else(|| Value::Text(s.clone())),
        Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(e.to_string()),
    }
}

/// XLSX stores every number as a double.
fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER as f64 {
        Value::Integer(f as i64)
    } else {
        Value::Number(f)
    }
}

/// Integers the writer stored as text because a double cannot hold them.
fn wide_integer(s: &str) -> Option<Value> {
    let i: i64 = s.parse().ok()?;
    (i.unsigned_abs() > MAX_EXACT_INTEGER && i.to_string() == s).then_some(Value::Integer(i))
}

fn temporal_value(at: NaiveDateTime) -> Value {
    let at = round_to_second(at);
    if at.time() == chrono::NaiveTime::MIN {
        Value::Date(at.date())
    } else {
        Value::DateTime(at)
    }
}

/// Serial dates are doubles, so a stored 09:30:00 may decode a hair off.
fn round_to_second(at: NaiveDateTime) -> NaiveDateTime {
    if at.nanosecond() == 0 {
        return at;
    }
    let shifted = at + Duration::milliseconds(500);
    shifted.with_nanosecond(0).unwrap_or(shifted)
}

fn parse_iso(s: &str) -> Option<Value> {
    if let Ok(at) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(temporal_value(at));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Value::Date)
}
