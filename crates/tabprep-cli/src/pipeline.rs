//! Load, transform and save orchestration for the `run` command.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tabprep_ingest::load_table;
use tabprep_model::{PipelineConfig, load_pipeline_config};
use tabprep_output::save_table;
use tabprep_transform::{Pipeline, RecordingObserver, TracingObserver};
use tracing::{info, info_span, trace};

use crate::logging::redact_value;
use crate::types::{RunReport, RunRequest, RunResult};

/// Rows shown in trace-level table previews.
const TRACE_PREVIEW_ROWS: usize = 5;

/// Pipeline configuration from `path`, or the built-in preprocessing pipeline.
pub fn resolve_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => load_pipeline_config(path)
            .with_context(|| format!("load pipeline config {}", path.display())),
        None => Ok(PipelineConfig::default_preprocessing()),
    }
}

/// Execute one run: load the input, apply the pipeline, save the result.
///
/// A failed load or transform returns before anything is written.
pub fn run_pipeline(request: &RunRequest) -> Result<RunResult> {
    let span = info_span!("run", input = %request.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut config = resolve_config(request.config.as_deref())?;
    if let Some(assembly) = request.assembly {
        config.assembly = assembly;
    }
    let pipeline = Pipeline::from_config(&config).context("build pipeline")?;

    let table = load_table(&request.input)
        .with_context(|| format!("load table {}", request.input.display()))?;
    trace_preview("input", &table);

    let mut observer = (TracingObserver, RecordingObserver::new());
    let outcome = pipeline.run_observed(&table, &mut observer);
    let (_, recorder) = observer;
    let mut result = outcome.context("run pipeline")?;
    trace_preview("result", &result);

    let output = if request.dry_run {
        info!(output = %request.output.display(), "dry run, output not written");
        None
    } else {
        save_table(&mut result, &request.output)
            .with_context(|| format!("save table {}", request.output.display()))?;
        Some(request.output.clone())
    };

    let report = RunReport {
        input: request.input.clone(),
        output,
        assembly: pipeline.assembly(),
        rows: result.height(),
        columns: result
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
        duration_ms: start.elapsed().as_millis(),
        events: recorder.into_events(),
    };
    if let Some(path) = &request.report {
        write_report(&report, path)?;
    }

    info!(
        rows = report.rows,
        columns = report.columns.len(),
        duration_ms = report.duration_ms,
        "run complete"
    );
    Ok(RunResult {
        report,
        table: result,
    })
}

/// Write `report` as pretty-printed JSON.
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write run report {}", path.display()))?;
    info!(path = %path.display(), "run report written");
    Ok(())
}

fn trace_preview(stage: &str, table: &DataFrame) {
    if tracing::enabled!(tracing::Level::TRACE) {
        let preview = table.head(Some(TRACE_PREVIEW_ROWS)).to_string();
        trace!(stage, preview = redact_value(&preview), "table preview");
    }
}
