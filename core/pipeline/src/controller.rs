//! FILENAME: core/pipeline/src/controller.rs
//! PURPOSE: Orchestrates load, filter, reset and export for one user session.
//! CONTEXT: The controller owns the only mutable state of the pipeline: which
//! result set is active. It keeps the loaded original next to the active
//! set and replaces (never mutates) the active set on every transition.
//! Filters are always recomputed from the original, so applying a new spec
//! is never cumulative with the previous one.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::source::DataSource;
use crate::{log_info, log_warn};
use chrono::NaiveDate;
use engine::{FilterSpec, ResultSet};
use persistence::{ReportArtifact, ReportBuilder};
use std::path::{Path, PathBuf};

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing loaded
    Idle,
    /// A result set is loaded and shown unfiltered
    Loaded,
    /// A filtered view of the loaded set is active
    Filtered,
}

/// What a successful `load` produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { rows: usize },
    /// The period holds no records. Not an error; the controller stays where it was.
    Empty,
}

#[derive(Debug, Clone)]
enum Session {
    Idle,
    Loaded {
        original: ResultSet,
    },
    Filtered {
        original: ResultSet,
        active: ResultSet,
        spec: FilterSpec,
    },
}

pub struct PipelineController<S> {
    source: S,
    builder: ReportBuilder,
    report_name: PathBuf,
    session: Session,
}

impl<S: DataSource> PipelineController<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, &PipelineConfig::default())
    }

    pub fn with_config(source: S, config: &PipelineConfig) -> Self {
        Self {
            source,
            builder: config.report_builder(),
            report_name: config.report_name.clone(),
            session: Session::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        match self.session {
            Session::Idle => PipelineState::Idle,
            Session::Loaded { .. } => PipelineState::Loaded,
            Session::Filtered { .. } => PipelineState::Filtered,
        }
    }

    /// The set currently shown and exported: filtered if a filter is active,
    /// else the loaded original.
    pub fn active(&self) -> Option<&ResultSet> {
        match &self.session {
            Session::Idle => None,
            Session::Loaded { original } => Some(original),
            Session::Filtered { active, .. } => Some(active),
        }
    }

    pub fn original(&self) -> Option<&ResultSet> {
        match &self.session {
            Session::Idle => None,
            Session::Loaded { original } | Session::Filtered { original, .. } => Some(original),
        }
    }

    /// Spec behind the active filtered set.
    pub fn filter_spec(&self) -> Option<&FilterSpec> {
        match &self.session {
            Session::Filtered { spec, .. } => Some(spec),
            _ => None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Default export destination.
    pub fn report_name(&self) -> &Path {
        &self.report_name
    }

    /// Fetches the records of a period and makes them the loaded set.
    ///
    /// The period is passed to the source as given, without ordering checks.
    /// On a fetch or schema failure, and on an empty period, the controller
    /// keeps its current state.
    ///
    /// This includes previously loaded data: after `LoadOutcome::Empty` the
    /// earlier period (and any filter on it) is still active, and `export`
    /// writes it. Call `end_session` first to drop it.
    pub fn load(&mut self, start: NaiveDate, end: NaiveDate) -> Result<LoadOutcome, PipelineError> {
        log_info!("PIPELINE", "load period={}..{}", start, end);

        let fetched = self.source.fetch(start, end).map_err(|e| {
            log_warn!("PIPELINE", "fetch failed: {}", e);
            PipelineError::from(e)
        })?;

        let set = ResultSet::new(fetched.columns, fetched.rows).map_err(|e| {
            log_warn!("PIPELINE", "malformed fetch result: {}", e);
            PipelineError::from(e)
        })?;

        if set.is_empty() {
            log_info!("PIPELINE", "no records for {}..{}", start, end);
            return Ok(LoadOutcome::Empty);
        }

        let rows = set.len();
        self.session = Session::Loaded { original: set };
        log_info!("PIPELINE", "loaded rows={}", rows);
        Ok(LoadOutcome::Loaded { rows })
    }

    /// Filters the loaded original with `spec` and makes the result active.
    pub fn apply_filter(&mut self, spec: FilterSpec) -> Result<&ResultSet, PipelineError> {
        let original = self
            .original()
            .cloned()
            .ok_or(PipelineError::NotLoaded("apply_filter"))?;

        let active = engine::apply(&original, &spec)?;
        log_info!(
            "PIPELINE",
            "filter active={} kept={}/{}",
            spec.active().count(),
            active.len(),
            original.len()
        );

        self.session = Session::Filtered {
            original,
            active,
            spec,
        };
        self.active().ok_or(PipelineError::NotLoaded("apply_filter"))
    }

    /// Drops any active filter and shows the loaded original again.
    pub fn reset_filter(&mut self) -> Result<&ResultSet, PipelineError> {
        let active = self.active().ok_or(PipelineError::NotLoaded("reset_filter"))?;
        let original = engine::reset(active);

        log_info!("PIPELINE", "filter reset rows={}", original.len());
        self.session = Session::Loaded { original };
        self.active().ok_or(PipelineError::NotLoaded("reset_filter"))
    }

    /// Writes the active set to `destination`, or to the configured report
    /// name when none is given. An existing file is overwritten.
    pub fn export(&self, destination: Option<&Path>) -> Result<ReportArtifact, PipelineError> {
        let set = self.active().ok_or(PipelineError::NotLoaded("export"))?;
        let path = destination.unwrap_or(self.report_name.as_path());

        let artifact = self.builder.build(set, path).map_err(|e| {
            log_warn!("EXPORT", "export to {} failed: {}", path.display(), e);
            PipelineError::from(e)
        })?;

        log_info!(
            "EXPORT",
            "wrote {} rows to {}",
            artifact.row_count,
            artifact.path.display()
        );
        Ok(artifact)
    }

    /// Releases the loaded data and returns to Idle.
    pub fn end_session(&mut self) {
        if !matches!(self.session, Session::Idle) {
            log_info!("PIPELINE", "session ended");
        }
        self.session = Session::Idle;
    }
}
