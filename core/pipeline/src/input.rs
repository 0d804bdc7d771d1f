//! FILENAME: core/pipeline/src/input.rs
//! PURPOSE: Helpers the presentation layer uses before calling the controller.
//! CONTEXT: Filter widgets only need to report their current text, whether
//! they are free-text entries or date pickers. The period fields are checked
//! for presence and `YYYY-MM-DD` shape only; ordering is left to the source.

use crate::error::InputError;
use chrono::NaiveDate;
use engine::{FilterSpec, DATE_FORMAT};
use std::fmt;

// ============================================================================
// FILTER INPUTS
// ============================================================================

/// Anything that can supply filter text for one column.
pub trait FilterInput {
    fn current_text(&self) -> String;
}

impl FilterInput for &str {
    fn current_text(&self) -> String {
        (*self).to_string()
    }
}

impl FilterInput for String {
    fn current_text(&self) -> String {
        self.clone()
    }
}

/// A date picker reports its date in `YYYY-MM-DD` form.
impl FilterInput for NaiveDate {
    fn current_text(&self) -> String {
        self.format(DATE_FORMAT).to_string()
    }
}

/// An unset picker or entry contributes no constraint.
impl<T: FilterInput> FilterInput for Option<T> {
    fn current_text(&self) -> String {
        self.as_ref().map(|v| v.current_text()).unwrap_or_default()
    }
}

/// Reads every widget once and builds the `FilterSpec` the controller expects.
pub fn collect_filters<'a, I>(inputs: I) -> FilterSpec
where
    I: IntoIterator<Item = (&'a str, &'a dyn FilterInput)>,
{
    inputs
        .into_iter()
        .map(|(column, input)| (column, input.current_text()))
        .collect()
}

// ============================================================================
// PERIOD
// ============================================================================

/// Extraction period as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Validates the two period fields.
/// Both are required and must parse as `YYYY-MM-DD`. Start after end is accepted.
pub fn parse_period(start: &str, end: &str) -> Result<Period, InputError> {
    let start_text = start.trim();
    let end_text = end.trim();
    if start_text.is_empty() {
        return Err(InputError::Missing("start date"));
    }
    if end_text.is_empty() {
        return Err(InputError::Missing("end date"));
    }

    Ok(Period {
        start: parse_date("start date", start_text)?,
        end: parse_date("end date", end_text)?,
    })
}

fn parse_date(field: &'static str, text: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| InputError::BadDate {
        field,
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        let period = parse_period(" 2024-01-01", "2024-01-31 ").unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(period.to_string(), "2024-01-01..2024-01-31");
    }

    #[test]
    fn test_parse_period_requires_both() {
        assert_eq!(parse_period("", "2024-01-31"), Err(InputError::Missing("start date")));
        assert_eq!(parse_period("2024-01-01", "  "), Err(InputError::Missing("end date")));
    }

    #[test]
    fn test_parse_period_rejects_other_layouts() {
        assert_eq!(
            parse_period("01/02/2024", "2024-01-31"),
            Err(InputError::BadDate {
                field: "start date",
                value: "01/02/2024".to_string()
            })
        );
        assert!(parse_period("2024-01-01", "2024-02-30").is_err());
    }

    #[test]
    fn test_reversed_period_is_not_rejected() {
        let period = parse_period("2024-02-01", "2024-01-01").unwrap();
        assert!(period.start > period.end);
    }

    #[test]
    fn test_collect_filters_mixes_widgets() {
        let pay_type = String::from("card");
        let day = Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let casa: Option<String> = None;
        let blank = String::from("  ");
        let operator = "Ion";

        let spec = collect_filters([
            ("PAY_TYPE", &pay_type as &dyn FilterInput),
            ("DATA", &day as &dyn FilterInput),
            ("CASA", &casa as &dyn FilterInput),
            ("SUMA_PRIM", &blank as &dyn FilterInput),
            ("OPERATOR", &operator as &dyn FilterInput),
        ]);

        assert_eq!(spec.get("PAY_TYPE"), Some("card"));
        assert_eq!(spec.get("DATA"), Some("2024-01-05"));
        assert_eq!(spec.get("CASA"), Some(""));
        assert_eq!(spec.get("OPERATOR"), Some("Ion"));
        assert_eq!(spec.active().count(), 3);
    }
}
