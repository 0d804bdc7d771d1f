//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{
    ExportError, ReportArtifact, ReportOptions, MAX_COLUMNS, MAX_EXACT_INTEGER, MAX_ROWS,
};
use engine::{ResultSet, Value};
use log::debug;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Writes result sets to XLSX reports.
///
/// Layout is fixed: one worksheet, the column names in row 1, then one row per
/// record in result set order. Values keep their type; dates get a date
/// number format so Excel shows them as dates. Integers too large for a
/// double are stored as their decimal text. Null values leave the cell
/// blank but the row is still written.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
}

/// Cell formats derived from the options once per build.
struct CellFormats {
    header: Option<Format>,
    blank: Format,
    date: Format,
    datetime: Format,
}

impl CellFormats {
    fn new(options: &ReportOptions) -> Self {
        Self {
            header: options.bold_header.then(|| Format::new().set_bold()),
            blank: Format::new().set_num_format("General"),
            date: Format::new().set_num_format(&options.date_format),
            datetime: Format::new().set_num_format(&options.datetime_format),
        }
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Writes `set` to `destination`, replacing any file already there.
    ///
    /// # Errors
    /// `ExportError` when the set does not fit a worksheet, when a value or the
    /// sheet name is rejected by the writer, or when the file cannot be saved.
    pub fn build(
        &self,
        set: &ResultSet,
        destination: impl AsRef<Path>,
    ) -> Result<ReportArtifact, ExportError> {
        let path = destination.as_ref();

        // Header takes one row
        if set.len() >= MAX_ROWS {
            return Err(ExportError::TooLarge(format!(
                "{} records exceed the {} row limit",
                set.len(),
                MAX_ROWS - 1
            )));
        }
        if set.column_count() > MAX_COLUMNS {
            return Err(ExportError::TooLarge(format!(
                "{} columns exceed the {} column limit",
                set.column_count(),
                MAX_COLUMNS
            )));
        }

        let formats = CellFormats::new(&self.options);
        let mut xlsx = XlsxWorkbook::new();

        {
            let worksheet = xlsx.add_worksheet();
            worksheet.set_name(&self.options.sheet_name)?;

            // Header row
            for (col, name) in set.columns().iter().enumerate() {
                let col = col as u16;
                if let Some(ref fmt) = formats.header {
                    worksheet.write_string_with_format(0, col, name.as_str(), fmt)?;
                } else {
                    worksheet.write_string(0, col, name.as_str())?;
                }
            }

            // Data rows start right below the header
            for (idx, record) in set.rows().iter().enumerate() {
                let row = (idx + 1) as u32;
                for (col, value) in record.iter().enumerate() {
                    write_value(worksheet, row, col as u16, value, &formats)?;
                }
                // A blank cell keeps an empty record inside the sheet dimension
                if !record.is_empty() && record.iter().all(stores_nothing) {
                    worksheet.write_blank(row, 0, &formats.blank)?;
                }
            }

            if self.options.autofit {
                worksheet.autofit();
            }
        }

        xlsx.save(path)?;

        debug!(
            "report saved to {} ({} rows, {} columns)",
            path.display(),
            set.len(),
            set.column_count()
        );

        Ok(ReportArtifact {
            path: path.to_path_buf(),
            sheet_name: self.options.sheet_name.clone(),
            column_count: set.column_count(),
            row_count: set.len(),
        })
    }
}

/// Null and empty text leave no cell behind.
fn stores_nothing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.is_empty(),
        _ => false,
    }
}

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    formats: &CellFormats,
) -> Result<(), ExportError> {
    match value {
        Value::Null => {}
        Value::Integer(i) if i.unsigned_abs() <= MAX_EXACT_INTEGER => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        // Beyond 2^53 a double would round the amount, so store the digits
        Value::Integer(i) => {
            worksheet.write_string(row, col, i.to_string())?;
        }
        Value::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Value::Text(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        Value::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Date(d) => {
            worksheet.write_datetime_with_format(row, col, d, &formats.date)?;
        }
        Value::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, &formats.datetime)?;
        }
    }
    Ok(())
}
