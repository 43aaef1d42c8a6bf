//! Constant fill of missing entries.
//!
//! Compatible (column, fill value) pairs:
//!
//! | column  | fill value       |
//! |---------|------------------|
//! | float   | float or integer |
//! | integer | integer          |
//! | string  | string           |
//! | boolean | boolean          |
//!
//! The output keeps the source column's dtype. For float columns `NaN`
//! counts as missing, so it is never accepted as a fill value. Fill values
//! must fit the column's width; they are never wrapped, saturated or rounded
//! to infinity.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tabprep_model::FillValue;

use crate::error::Result;
use crate::values::{float_values, int_values, source_column, type_mismatch, uint_values};

/// Result of filling one column.
#[derive(Debug, Clone)]
pub struct Filled {
    pub column: Column,
    /// Number of entries that were replaced.
    pub filled: usize,
}

/// Replace missing entries of `source` with `value`, producing `output`.
///
/// Fails with [`TransformError::TypeMismatch`] when the fill value is not
/// compatible with the column type (see the module table), does not fit the
/// column's width, or is `NaN`.
///
/// [`TransformError::TypeMismatch`]: crate::TransformError::TypeMismatch
pub fn fill(df: &DataFrame, source: &str, output: &str, value: &FillValue) -> Result<Filled> {
    let column = source_column(df, source, "fill")?;
    let dtype = column.dtype();
    let mismatch = |expected: &str| {
        type_mismatch(
            source,
            dtype,
            format!("{expected} fill value"),
            format!("{} fill value", value.type_name()),
        )
    };
    let out_of_range = || mismatch(&format!("in-range {dtype}"));

    if dtype.is_float() {
        let replacement = match value {
            FillValue::Float(v) if v.is_nan() => {
                return Err(type_mismatch(
                    source,
                    dtype,
                    "non-NaN fill value",
                    "NaN fill value",
                ));
            }
            FillValue::Float(v) => *v,
            FillValue::Int(v) => *v as f64,
            _ => return Err(mismatch("float or integer")),
        };
        let overflows_f32 = *dtype == DataType::Float32
            && replacement.is_finite()
            && !(replacement as f32).is_finite();
        if overflows_f32 {
            return Err(out_of_range());
        }
        let (values, filled) = replace_missing(float_values(column)?, replacement);
        return finish(Series::new(output.into(), values), dtype, filled);
    }

    if dtype.is_integer() {
        let FillValue::Int(replacement) = value else {
            return Err(mismatch("integer"));
        };
        let (series, filled) = if dtype.is_unsigned_integer() {
            let Ok(replacement) = u64::try_from(*replacement) else {
                return Err(out_of_range());
            };
            let (values, filled) = replace_missing(uint_values(column)?, replacement);
            (Series::new(output.into(), values), filled)
        } else {
            let (values, filled) = replace_missing(int_values(column)?, *replacement);
            (Series::new(output.into(), values), filled)
        };
        // Narrower integer columns reject out-of-range fill values here.
        return match series.strict_cast(dtype) {
            Ok(series) => Ok(Filled {
                column: series.into_column(),
                filled,
            }),
            Err(_) => Err(out_of_range()),
        };
    }

    if dtype.is_string() {
        let FillValue::Str(replacement) = value else {
            return Err(mismatch("string"));
        };
        let values: Vec<Option<&str>> = column.str()?.into_iter().collect();
        let (values, filled) = replace_missing(values, replacement.as_str());
        return finish(Series::new(output.into(), values), dtype, filled);
    }

    if dtype.is_bool() {
        let FillValue::Bool(replacement) = value else {
            return Err(mismatch("boolean"));
        };
        let values: Vec<Option<bool>> = column.bool()?.into_iter().collect();
        let (values, filled) = replace_missing(values, *replacement);
        return finish(Series::new(output.into(), values), dtype, filled);
    }

    Err(type_mismatch(
        source,
        dtype,
        "a float, integer, string or boolean column",
        "unsupported column type",
    ))
}

/// Substitute `replacement` for every `None`, counting the substitutions.
fn replace_missing<T: Copy>(values: Vec<Option<T>>, replacement: T) -> (Vec<T>, usize) {
    let mut filled = 0;
    let values: Vec<T> = values
        .into_iter()
        .map(|value| {
            value.unwrap_or_else(|| {
                filled += 1;
                replacement
            })
        })
        .collect();
    (values, filled)
}

fn finish(series: Series, dtype: &DataType, filled: usize) -> Result<Filled> {
    let series = if series.dtype() == dtype {
        series
    } else {
        series.cast(dtype)?
    };
    Ok(Filled {
        column: series.into_column(),
        filled,
    })
}
