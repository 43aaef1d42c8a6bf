//! Category vocabulary for label encoding.
//!
//! Codes are assigned in ascending order of the distinct observed values, so
//! the mapping depends only on the set of values in the column and never on
//! row order.

use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::Column;
use serde::Serialize;

use crate::error::Result;
use crate::values::{int_values, type_mismatch, uint_values};

/// A distinct categorical value.
///
/// One column only ever yields one variant, so the cross-variant ordering is
/// irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum CategoryKey {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(String),
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<i64> for CategoryKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for CategoryKey {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<bool> for CategoryKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Read a categorical column as keys, one per row (`None` for missing).
///
/// Accepts string, integer and boolean columns.
pub fn category_keys(column: &Column) -> Result<Vec<Option<CategoryKey>>> {
    let dtype = column.dtype();
    if dtype.is_string() {
        Ok(column
            .str()?
            .into_iter()
            .map(|value| value.map(CategoryKey::from))
            .collect())
    } else if dtype.is_unsigned_integer() {
        Ok(uint_values(column)?
            .into_iter()
            .map(|value| value.map(CategoryKey::UInt))
            .collect())
    } else if dtype.is_integer() {
        Ok(int_values(column)?
            .into_iter()
            .map(|value| value.map(CategoryKey::Int))
            .collect())
    } else if dtype.is_bool() {
        Ok(column
            .bool()?
            .into_iter()
            .map(|value| value.map(CategoryKey::Bool))
            .collect())
    } else {
        Err(type_mismatch(
            column.name().as_str(),
            dtype,
            "string, integer or boolean categories",
            "unsupported column type",
        ))
    }
}

/// Mapping from distinct category to non-negative integer code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryVocabulary {
    categories: Vec<CategoryKey>,
    #[serde(skip)]
    codes: BTreeMap<CategoryKey, u32>,
}

impl CategoryVocabulary {
    /// Build a vocabulary from observed keys; duplicates collapse.
    pub fn from_keys(keys: impl IntoIterator<Item = CategoryKey>) -> Self {
        let mut codes: BTreeMap<CategoryKey, u32> =
            keys.into_iter().map(|key| (key, 0)).collect();
        let mut categories = Vec::with_capacity(codes.len());
        for (index, (key, code)) in codes.iter_mut().enumerate() {
            *code = index as u32;
            categories.push(key.clone());
        }
        Self { categories, codes }
    }

    /// Build a vocabulary from the non-missing values of a column.
    pub fn fit(column: &Column) -> Result<Self> {
        let keys = category_keys(column)?;
        Ok(Self::from_keys(keys.into_iter().flatten()))
    }

    pub fn code(&self, key: &CategoryKey) -> Option<u32> {
        self.codes.get(key).copied()
    }

    /// Category for a code; `None` for the reserved code or out-of-range codes.
    pub fn decode(&self, code: u32) -> Option<&CategoryKey> {
        self.categories.get(code as usize)
    }

    /// Categories in code order.
    pub fn categories(&self) -> &[CategoryKey] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Code given to missing entries under the reserve policy.
    pub fn reserved_code(&self) -> u32 {
        self.categories.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_codes_follow_sorted_order() {
        let vocab = CategoryVocabulary::from_keys(
            ["z", "x", "y", "x"].into_iter().map(CategoryKey::from),
        );
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.code(&"x".into()), Some(0));
        assert_eq!(vocab.code(&"y".into()), Some(1));
        assert_eq!(vocab.code(&"z".into()), Some(2));
        assert_eq!(vocab.code(&"w".into()), None);
        assert_eq!(vocab.reserved_code(), 3);
        assert_eq!(vocab.decode(3), None);
    }

    #[test]
    fn test_integers_sort_numerically() {
        let vocab = CategoryVocabulary::from_keys([10_i64, 9, -1].map(CategoryKey::from));
        assert_eq!(
            vocab.categories(),
            &[
                CategoryKey::Int(-1),
                CategoryKey::Int(9),
                CategoryKey::Int(10)
            ]
        );
    }

    #[test]
    fn test_unsigned_keys_keep_full_range() {
        let column = Series::new("n".into(), vec![u64::MAX, 1, u64::MAX]).into_column();
        let vocab = CategoryVocabulary::fit(&column).unwrap();
        assert_eq!(
            vocab.categories(),
            &[CategoryKey::UInt(1), CategoryKey::UInt(u64::MAX)]
        );
    }

    #[test]
    fn test_fit_skips_missing() {
        let column =
            Series::new("b".into(), vec![Some(true), None, Some(false)]).into_column();
        let vocab = CategoryVocabulary::fit(&column).unwrap();
        assert_eq!(
            vocab.categories(),
            &[CategoryKey::Bool(false), CategoryKey::Bool(true)]
        );
    }

    #[test]
    fn test_float_column_is_rejected() {
        let column = Series::new("f".into(), vec![1.5, 2.5]).into_column();
        assert!(CategoryVocabulary::fit(&column).is_err());
    }

    #[test]
    fn test_serializes_categories_only() {
        let vocab = CategoryVocabulary::from_keys(["b", "a"].map(CategoryKey::from));
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"{"categories":["a","b"]}"#);
    }
}
