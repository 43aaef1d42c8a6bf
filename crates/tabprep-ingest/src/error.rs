//! Error types for table loading.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading a table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file does not exist.
    #[error("table not found: {path}")]
    NotFound { path: PathBuf },

    /// Extension does not name a supported format.
    #[error("unsupported table format for {path} (expected .parquet, .pq or .csv)")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to open the source file.
    #[error("failed to read table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but could not be parsed into a table.
    #[error("malformed {format} table {path}: {source}")]
    Malformed {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: PolarsError,
    },
}

/// Result type alias for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
