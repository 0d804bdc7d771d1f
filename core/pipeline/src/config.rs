//! FILENAME: core/pipeline/src/config.rs
//! PURPOSE: Settings the host can tune without code changes.
//! CONTEXT: Read from TOML. Every field has a default, so an empty file or a
//! missing file both yield a working configuration.

use crate::error::ConfigError;
use persistence::{ReportBuilder, ReportOptions, DEFAULT_REPORT_NAME};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Destination used by `export` when the caller passes none
    pub report_name: PathBuf,
    /// env_logger filter directives
    pub log_filter: String,
    pub report: ReportOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            report_name: PathBuf::from(DEFAULT_REPORT_NAME),
            log_filter: "info".to_string(),
            report: ReportOptions::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config file; a path that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn report_builder(&self) -> ReportBuilder {
        ReportBuilder::with_options(self.report.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_gives_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.report_name, PathBuf::from("raport_casalenta.xlsx"));
        assert_eq!(config.report.sheet_name, "Raport Casalenta");
    }

    #[test]
    fn test_partial_override() {
        let config = PipelineConfig::from_toml_str(
            r#"
            report_name = "out/march.xlsx"

            [report]
            sheet_name = "Martie"
            bold_header = false
            "#,
        )
        .unwrap();

        assert_eq!(config.report_name, PathBuf::from("out/march.xlsx"));
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.report.sheet_name, "Martie");
        assert!(!config.report.bold_header);
        assert_eq!(config.report.date_format, "yyyy-mm-dd");
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let err = PipelineConfig::from_toml_str("report_name = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::load(&dir.path().join("casalenta.toml")).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casalenta.toml");
        fs::write(&path, "log_filter = \"debug\"\n").unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.report_builder().options(), &ReportOptions::default());
    }
}
