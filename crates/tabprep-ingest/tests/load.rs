//! Integration tests for table loading.

use std::fs::{self, File};

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, ParquetWriter, Series};
use tabprep_ingest::{LoadError, load_table};

fn sample_df() -> DataFrame {
    DataFrame::new(vec![
        Series::new("feature_a".into(), vec![1.0, 2.0, 3.0, 4.0]).into_column(),
        Series::new("feature_b".into(), vec!["x", "y", "x", "z"]).into_column(),
        Series::new("feature_c".into(), vec![Some(5.0), None, Some(7.0), None]).into_column(),
    ])
    .unwrap()
}

#[test]
fn loads_parquet_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.parquet");
    let mut df = sample_df();
    let file = File::create(&path).unwrap();
    ParquetWriter::new(file).finish(&mut df).unwrap();

    let loaded = load_table(&path).expect("load parquet");

    assert!(loaded.equals_missing(&df));
    assert_eq!(loaded.column("feature_c").unwrap().null_count(), 2);
}

#[test]
fn loads_csv_with_empty_cells_as_null() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(
        &path,
        "feature_a,feature_b,feature_c\n1.0,x,5.0\n2.0,y,\n3.0,x,7.0\n4.0,z,\n",
    )
    .unwrap();

    let loaded = load_table(&path).expect("load csv");

    assert_eq!(loaded.height(), 4);
    let c = loaded.column("feature_c").unwrap().f64().unwrap();
    assert_eq!(c.get(0), Some(5.0));
    assert_eq!(c.get(1), None);
    assert_eq!(c.get(3), None);
    let b = loaded.column("feature_b").unwrap().str().unwrap();
    assert_eq!(b.get(3), Some("z"));
}

#[test]
fn directory_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.parquet");
    fs::create_dir(&path).unwrap();

    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert!(err.to_string().contains("nested.parquet"));
}
