//! Error types for table writing.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while saving a table.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Extension does not name a supported format.
    #[error("unsupported table format for {path} (expected .parquet, .pq or .csv)")]
    UnsupportedFormat { path: PathBuf },

    /// File system operation failed.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding the table failed.
    #[error("failed to write {format} table {path}: {source}")]
    Write {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: PolarsError,
    },

    /// Moving the finished temp file into place failed.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicRename {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for saving operations.
pub type Result<T> = std::result::Result<T, SaveError>;
