//! Label encoding of categorical columns.

use polars::prelude::{Column, DataFrame};
use tabprep_model::MissingCategoryPolicy;

use crate::error::{Result, TransformError};
use crate::values::source_column;
use crate::vocabulary::{CategoryVocabulary, category_keys};

/// Result of encoding one column.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// `UInt32` codes, one per row.
    pub column: Column,
    pub vocabulary: CategoryVocabulary,
    /// Rows that received the reserved code.
    pub reserved: usize,
}

/// Encode `source` into a `UInt32` column named `output`.
///
/// The vocabulary is fitted on the column itself. Missing entries either fail
/// with [`TransformError::MissingCategory`] or get the vocabulary's reserved
/// code, depending on `policy`.
pub fn encode(
    df: &DataFrame,
    source: &str,
    output: &str,
    policy: MissingCategoryPolicy,
) -> Result<Encoded> {
    let column = source_column(df, source, "encode")?;
    let keys = category_keys(column)?;

    if policy == MissingCategoryPolicy::Error
        && let Some(row) = keys.iter().position(Option::is_none)
    {
        return Err(TransformError::MissingCategory {
            column: source.to_string(),
            row,
        });
    }

    let vocabulary = CategoryVocabulary::from_keys(keys.iter().flatten().cloned());
    let reserved_code = vocabulary.reserved_code();
    let mut reserved = 0usize;
    let codes: Vec<u32> = keys
        .iter()
        .map(|key| match key.as_ref().and_then(|k| vocabulary.code(k)) {
            Some(code) => code,
            None => {
                reserved += 1;
                reserved_code
            }
        })
        .collect();

    Ok(Encoded {
        column: Column::new(output.into(), codes),
        vocabulary,
        reserved,
    })
}
