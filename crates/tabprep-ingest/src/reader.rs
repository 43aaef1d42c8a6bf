//! Parquet and CSV table reading.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{CsvReadOptions, DataFrame, ParquetReader, SerReader};
use tabprep_model::TableFormat;
use tracing::{debug, info};

use crate::error::{LoadError, Result};

/// Rows sampled for CSV schema inference.
const CSV_INFER_SCHEMA_ROWS: usize = 100;

/// Load a table, detecting the format from the path extension.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let format = TableFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    load_table_as(path, format)
}

/// Load a table in an explicit format, ignoring the extension.
pub fn load_table_as(path: &Path, format: TableFormat) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), %format, "loading table");
    let start = Instant::now();

    let df = match format {
        TableFormat::Parquet => read_parquet(path)?,
        TableFormat::Csv => read_csv(path)?,
    };

    info!(
        path = %path.display(),
        %format,
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "table loaded"
    );
    Ok(df)
}

fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            format: TableFormat::Parquet.as_str(),
            source,
        })
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    let malformed = |source| LoadError::Malformed {
        path: path.to_path_buf(),
        format: TableFormat::Csv.as_str(),
        source,
    };
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(CSV_INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(malformed)?
        .finish()
        .map_err(malformed)
}
