//! Transform and pipeline errors.

use polars::prelude::PolarsError;
use tabprep_model::ConfigError;
use thiserror::Error;

/// Errors raised while building or running a pipeline.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A transform reads a column the table does not have.
    #[error("transform '{transform}' reads column '{column}', which is not in the table")]
    MissingColumn { transform: String, column: String },

    /// Standardization input has no spread (or no observations).
    #[error("cannot standardize column '{column}': {reason}")]
    DegenerateInput { column: String, reason: String },

    /// Encoding source has a missing entry and the policy forbids it.
    #[error("column '{column}' has a missing category at row {row}")]
    MissingCategory { column: String, row: usize },

    /// Column type does not suit the transform or its parameter.
    #[error("type mismatch on column '{column}' ({dtype}): expected {expected}, got {found}")]
    TypeMismatch {
        column: String,
        dtype: String,
        expected: String,
        found: String,
    },

    /// Invalid pipeline definition.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("dataframe operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
