use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or validating a pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML syntax or shape error outside of a file.
    #[error("invalid pipeline config: {0}")]
    Toml(#[source] toml::de::Error),

    /// A key no transform or pipeline setting understands (usually a typo).
    #[error("unknown field '{field}' in {location}")]
    UnknownField { location: String, field: String },

    #[error("pipeline has no transforms")]
    EmptyPipeline,

    #[error("output column '{column}' is produced by more than one transform")]
    DuplicateOutput { column: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
