//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for pipeline integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use pipeline::{
    init_logging, DataSource, FetchError, FetchResult, MemorySource, PipelineConfig,
    PipelineController, Value, CASALENTA_COLUMNS, CASALENTA_DATE_COLUMN, DEFAULT_REPORT_NAME,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use tempfile::TempDir;

/// Controller over the casalenta fixture with reports going to a temp dir.
pub struct TestHarness {
    pub controller: PipelineController<MemorySource>,
    pub dir: TempDir,
}

impl TestHarness {
    /// Idle controller.
    pub fn new() -> Self {
        init_logging("debug");
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        TestHarness {
            controller: PipelineController::with_config(CasalentaFixture::source(), &config),
            dir,
        }
    }

    /// Controller with January 2024 loaded.
    pub fn loaded() -> Self {
        let mut harness = Self::new();
        harness
            .controller
            .load(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        harness
    }

    /// Default report destination inside the temp dir.
    pub fn report_path(&self) -> PathBuf {
        self.dir.path().join(DEFAULT_REPORT_NAME)
    }
}

/// Config whose default report lands in `dir`.
pub fn config_in(dir: &TempDir) -> PipelineConfig {
    PipelineConfig {
        report_name: dir.path().join(DEFAULT_REPORT_NAME),
        ..PipelineConfig::default()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Casalenta ledger rows: date, amount, payment type, till.
pub struct CasalentaFixture;

impl CasalentaFixture {
    pub fn headers() -> Vec<String> {
        CASALENTA_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    pub fn data() -> Vec<(NaiveDate, f64, &'static str, &'static str)> {
        vec![
            (date(2024, 1, 3), 150.0, "CARD", "Casa 1"),
            (date(2024, 1, 5), 320.0, "CASH", "Casa 2"),
            (date(2024, 1, 12), 75.5, "CARD", "Casa 2"),
            (date(2024, 1, 20), 410.0, "CASH", "Casa 1"),
            (date(2024, 2, 2), 90.0, "CARD", "Casa 3"),
        ]
    }

    pub fn rows() -> Vec<Vec<Value>> {
        Self::data()
            .into_iter()
            .map(|(day, amount, pay_type, casa)| {
                vec![
                    Value::Date(day),
                    Value::Number(amount),
                    Value::text(pay_type),
                    Value::text(casa),
                ]
            })
            .collect()
    }

    pub fn source() -> MemorySource {
        MemorySource::new(Self::headers(), Self::rows(), CASALENTA_DATE_COLUMN)
    }

    /// Same ledger as CSV text.
    pub fn csv() -> String {
        let mut text = CASALENTA_COLUMNS.join(",");
        text.push('\n');
        for (day, amount, pay_type, casa) in Self::data() {
            text.push_str(&format!("{},{},{},{}\n", day, amount, pay_type, casa));
        }
        text
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// Source that can never be reached.
pub struct FailingSource;

impl DataSource for FailingSource {
    fn fetch(&mut self, _start: NaiveDate, _end: NaiveDate) -> Result<FetchResult, FetchError> {
        Err(FetchError::Connection("ORA-12541: no listener".to_string()))
    }
}

/// Source that replays queued results, one per fetch.
#[derive(Default)]
pub struct ScriptedSource {
    results: VecDeque<Result<FetchResult, FetchError>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, result: Result<FetchResult, FetchError>) -> Self {
        self.results.push_back(result);
        self
    }
}

impl DataSource for ScriptedSource {
    fn fetch(&mut self, _start: NaiveDate, _end: NaiveDate) -> Result<FetchResult, FetchError> {
        self.results
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Query("no scripted result left".to_string())))
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Rows as display text, which survives a trip through the report file.
pub fn rendered<I, R>(rows: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[Value]>,
{
    rows.into_iter()
        .map(|row| row.as_ref().iter().map(Value::render).collect())
        .collect()
}
