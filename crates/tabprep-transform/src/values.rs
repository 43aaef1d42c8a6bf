//! Column lookup and value extraction shared by the transforms.

use polars::prelude::{Column, DataFrame, DataType};

use crate::error::{Result, TransformError};

/// Look up the source column of a transform.
pub(crate) fn source_column<'a>(
    df: &'a DataFrame,
    column: &str,
    transform: &str,
) -> Result<&'a Column> {
    df.column(column)
        .map_err(|_| TransformError::MissingColumn {
            transform: transform.to_string(),
            column: column.to_string(),
        })
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_float() || dtype.is_integer()
}

/// Extract a numeric column as `f64`, with nulls and `NaN` mapped to `None`.
pub(crate) fn float_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast.f64()?;
    Ok(values
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

/// Extract a signed integer column as `i64`.
pub(crate) fn int_values(column: &Column) -> Result<Vec<Option<i64>>> {
    let cast = column.strict_cast(&DataType::Int64)?;
    Ok(cast.i64()?.into_iter().collect())
}

/// Extract an unsigned integer column as `u64`.
pub(crate) fn uint_values(column: &Column) -> Result<Vec<Option<u64>>> {
    let cast = column.strict_cast(&DataType::UInt64)?;
    Ok(cast.u64()?.into_iter().collect())
}

pub(crate) fn type_mismatch(
    column: &str,
    dtype: &DataType,
    expected: impl Into<String>,
    found: impl Into<String>,
) -> TransformError {
    TransformError::TypeMismatch {
        column: column.to_string(),
        dtype: dtype.to_string(),
        expected: expected.into(),
        found: found.into(),
    }
}
