use std::path::PathBuf;

use polars::prelude::DataFrame;
use serde::Serialize;
use tabprep_model::AssemblyMode;
use tabprep_transform::PipelineEvent;

/// What a single `run` should do.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub assembly: Option<AssemblyMode>,
    pub dry_run: bool,
    pub report: Option<PathBuf>,
}

impl RunRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config: None,
            assembly: None,
            dry_run: false,
            report: None,
        }
    }
}

/// Serializable record of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    /// `None` for dry runs.
    pub output: Option<PathBuf>,
    pub assembly: AssemblyMode,
    pub rows: usize,
    pub columns: Vec<String>,
    pub duration_ms: u128,
    pub events: Vec<PipelineEvent>,
}

#[derive(Debug)]
pub struct RunResult {
    pub report: RunReport,
    pub table: DataFrame,
}
