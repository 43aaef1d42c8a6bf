//! Z-score standardization.
//!
//! Statistics are population statistics (divisor `n`) over the non-missing
//! entries. Missing entries (null or `NaN`) stay missing in the output.

use polars::prelude::{Column, DataFrame};
use serde::Serialize;

use crate::error::{Result, TransformError};
use crate::values::{float_values, is_numeric, source_column, type_mismatch};

/// Population mean and standard deviation of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
    /// Number of non-missing observations.
    pub count: usize,
}

impl Moments {
    /// Compute the moments of the given observations.
    ///
    /// Returns `None` when there are no observations.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            count: values.len(),
        })
    }

    /// Standardized value of a single observation.
    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

/// Result of standardizing one column.
#[derive(Debug, Clone)]
pub struct Standardized {
    pub column: Column,
    pub moments: Moments,
    /// Missing entries carried through to the output.
    pub missing: usize,
}

/// Standardize `source` into a new `Float64` column named `output`.
///
/// Fails with [`TransformError::DegenerateInput`] when the column has no
/// observations or zero (or non-finite) standard deviation, and with
/// [`TransformError::TypeMismatch`] for non-numeric columns.
pub fn standardize(df: &DataFrame, source: &str, output: &str) -> Result<Standardized> {
    let column = source_column(df, source, "standardize")?;
    if !is_numeric(column.dtype()) {
        return Err(type_mismatch(
            source,
            column.dtype(),
            "integer or float values",
            "non-numeric column",
        ));
    }

    let values = float_values(column)?;
    let observed: Vec<f64> = values.iter().flatten().copied().collect();
    let missing = values.len() - observed.len();

    let Some(moments) = Moments::from_values(&observed) else {
        return Err(TransformError::DegenerateInput {
            column: source.to_string(),
            reason: "no non-missing values".to_string(),
        });
    };
    if moments.std_dev == 0.0 {
        return Err(TransformError::DegenerateInput {
            column: source.to_string(),
            reason: "zero variance".to_string(),
        });
    }
    if !moments.std_dev.is_finite() || !moments.mean.is_finite() {
        return Err(TransformError::DegenerateInput {
            column: source.to_string(),
            reason: "non-finite statistics".to_string(),
        });
    }

    let scaled: Vec<Option<f64>> = values
        .iter()
        .map(|value| value.map(|v| moments.z_score(v)))
        .collect();

    Ok(Standardized {
        column: Column::new(output.into(), scaled),
        moments,
        missing,
    })
}
