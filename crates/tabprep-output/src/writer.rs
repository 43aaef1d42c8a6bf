//! Parquet and CSV table writing.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use tabprep_model::TableFormat;
use tracing::{debug, info, warn};

use crate::error::{Result, SaveError};

/// Save a table, detecting the format from the path extension.
///
/// Parent directories are created as needed and an existing file at `path`
/// is replaced.
pub fn save_table(table: &mut DataFrame, path: &Path) -> Result<()> {
    let format = TableFormat::from_path(path).ok_or_else(|| SaveError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    save_table_as(table, path, format)
}

/// Save a table in an explicit format, ignoring the extension.
///
/// The table is written to a temp sibling and renamed into place, so `path`
/// holds either the previous contents or the complete new table.
pub fn save_table_as(table: &mut DataFrame, path: &Path, format: TableFormat) -> Result<()> {
    debug!(path = %path.display(), %format, "saving table");
    let start = Instant::now();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SaveError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path, format);
    if let Err(error) = write_temp(table, &temp_path, format) {
        discard(&temp_path);
        return Err(error);
    }

    fs::rename(&temp_path, path).map_err(|source| {
        discard(&temp_path);
        SaveError::AtomicRename {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        path = %path.display(),
        %format,
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "table saved"
    );
    Ok(())
}

fn temp_path_for(path: &Path, format: TableFormat) -> PathBuf {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or(format.as_str());
    path.with_extension(format!("{ext}.tmp"))
}

fn write_temp(table: &mut DataFrame, temp_path: &Path, format: TableFormat) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|source| SaveError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source,
    })?;

    let written = match format {
        TableFormat::Parquet => ParquetWriter::new(&mut file).finish(table).map(|_| ()),
        TableFormat::Csv => CsvWriter::new(&mut file).include_header(true).finish(table),
    };
    written.map_err(|source| SaveError::Write {
        path: temp_path.to_path_buf(),
        format: format.as_str(),
        source,
    })?;

    file.sync_all().map_err(|source| SaveError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source,
    })
}

fn discard(temp_path: &Path) {
    if temp_path.exists()
        && let Err(error) = fs::remove_file(temp_path)
    {
        warn!(path = %temp_path.display(), %error, "failed to remove temp file");
    }
}
