//! End-to-end runs through real files.

use std::fs;
use std::path::Path;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use tabprep_cli::pipeline::{resolve_config, run_pipeline};
use tabprep_cli::types::RunRequest;
use tabprep_ingest::load_table;
use tabprep_model::AssemblyMode;
use tabprep_output::save_table;
use tempfile::tempdir;

fn write_input(path: &Path) {
    let mut df = DataFrame::new(vec![
        Series::new("feature_a".into(), vec![1.0, 2.0, 3.0, 4.0]).into_column(),
        Series::new("feature_b".into(), vec!["x", "y", "x", "z"]).into_column(),
        Series::new("feature_c".into(), vec![Some(5.0), None, Some(7.0), None]).into_column(),
    ])
    .unwrap();
    save_table(&mut df, path).unwrap();
}

#[test]
fn default_pipeline_through_parquet_files() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data").join("data.parquet");
    let output = dir.path().join("data").join("preprocessed_data.parquet");
    write_input(&input);

    let result = run_pipeline(&RunRequest::new(&input, &output)).unwrap();

    assert_eq!(result.report.output.as_deref(), Some(output.as_path()));
    let saved = load_table(&output).unwrap();
    assert!(saved.equals_missing(&result.table));
    assert_eq!(
        saved.get_column_names_str(),
        vec!["feature_a", "feature_b_encoded", "feature_c"]
    );
    let codes: Vec<Option<u32>> = saved
        .column("feature_b_encoded")
        .unwrap()
        .u32()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(codes, vec![Some(0), Some(1), Some(0), Some(2)]);
    let filled: Vec<Option<f64>> = saved
        .column("feature_c")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(filled, vec![Some(5.0), Some(-1.0), Some(7.0), Some(-1.0)]);
}

#[test]
fn dry_run_writes_report_but_no_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.parquet");
    let output = dir.path().join("out.parquet");
    let report_path = dir.path().join("reports").join("run.json");
    write_input(&input);

    let mut request = RunRequest::new(&input, &output);
    request.dry_run = true;
    request.report = Some(report_path.clone());
    let result = run_pipeline(&request).unwrap();

    assert!(!output.exists());
    assert!(result.report.output.is_none());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["rows"], 4);
    assert!(report["output"].is_null());
    let events = report["events"].as_array().unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0]["event"], "run_started");
    assert_eq!(events[4]["event"], "run_completed");

    insta::assert_json_snapshot!(result.report.events[2], @r#"
    {
      "event": "transform_applied",
      "index": 1,
      "name": "encode:feature_b",
      "kind": "encode",
      "source": "feature_b",
      "output": "feature_b_encoded",
      "summary": {
        "kind": "encode",
        "vocabulary": {
          "categories": [
            "x",
            "y",
            "z"
          ]
        },
        "reserved": 0
      }
    }
    "#);
}

#[test]
fn config_file_with_append_assembly_and_csv_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.parquet");
    let output = dir.path().join("out.csv");
    let config = dir.path().join("pipeline.toml");
    write_input(&input);
    fs::write(
        &config,
        r#"
assembly = "append_to_input"

[[transform]]
kind = "fill"
source = "feature_c"
output = "feature_c_filled"
value = 0.5
"#,
    )
    .unwrap();

    let mut request = RunRequest::new(&input, &output);
    request.config = Some(config);
    let result = run_pipeline(&request).unwrap();

    assert_eq!(result.report.assembly, AssemblyMode::AppendToInput);
    let saved = load_table(&output).unwrap();
    assert_eq!(
        saved.get_column_names_str(),
        vec!["feature_a", "feature_b", "feature_c", "feature_c_filled"]
    );
    assert_eq!(saved.column("feature_c").unwrap().null_count(), 2);
    assert_eq!(saved.column("feature_c_filled").unwrap().null_count(), 0);
}

#[test]
fn assembly_override_beats_config() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.parquet");
    write_input(&input);

    let mut request = RunRequest::new(&input, dir.path().join("out.parquet"));
    request.assembly = Some(AssemblyMode::AppendToInput);
    request.dry_run = true;
    let result = run_pipeline(&request).unwrap();

    assert_eq!(
        result.report.columns,
        vec![
            "feature_a",
            "feature_b",
            "feature_c",
            "feature_b_encoded"
        ]
    );
}

#[test]
fn failed_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.parquet");
    let output = dir.path().join("out.parquet");
    let report_path = dir.path().join("run.json");
    let config = dir.path().join("pipeline.toml");
    write_input(&input);
    fs::write(
        &config,
        r#"
[[transform]]
kind = "standardize"
source = "feature_a"

[[transform]]
kind = "encode"
source = "feature_d"
"#,
    )
    .unwrap();

    let mut request = RunRequest::new(&input, &output);
    request.config = Some(config);
    request.report = Some(report_path.clone());
    let err = run_pipeline(&request).unwrap_err();

    assert!(format!("{err:#}").contains("feature_d"), "{err:#}");
    assert!(!output.exists());
    assert!(!report_path.exists());
}

#[test]
fn missing_input_is_reported_with_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("absent.parquet");

    let err = run_pipeline(&RunRequest::new(&input, dir.path().join("out.parquet")))
        .unwrap_err();

    assert!(format!("{err:#}").contains("absent.parquet"), "{err:#}");
}

#[test]
fn builtin_config_when_no_path() {
    let config = resolve_config(None).unwrap();
    assert_eq!(config.transforms.len(), 3);
    assert_eq!(config.transforms[1].output_name(), "feature_b_encoded");
}
