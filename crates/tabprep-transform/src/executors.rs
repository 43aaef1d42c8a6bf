//! Transform dispatch.
//!
//! Maps a configured [`TransformSpec`] to the transform function for its
//! [`TransformKind`] and normalizes the result into a [`TransformOutput`].

use polars::prelude::{Column, DataFrame};
use serde::Serialize;
use tabprep_model::{TransformKind, TransformSpec};

use crate::encode::encode;
use crate::error::Result;
use crate::fill::fill;
use crate::standardize::standardize;
use crate::vocabulary::CategoryVocabulary;

/// What a transform learned or changed, for events and reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformSummary {
    Standardize {
        mean: f64,
        std_dev: f64,
        observed: usize,
        missing: usize,
    },
    Encode {
        vocabulary: CategoryVocabulary,
        reserved: usize,
    },
    Fill {
        filled: usize,
    },
}

/// Column produced by one transform plus its summary.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub column: Column,
    pub summary: TransformSummary,
}

/// Apply one configured transform to a table.
///
/// Reads only `spec.source` and returns a column named after
/// [`TransformSpec::output_name`] with the table's height.
pub fn apply_transform(df: &DataFrame, spec: &TransformSpec) -> Result<TransformOutput> {
    let output = spec.output_name();
    match &spec.kind {
        TransformKind::Standardize => {
            let result = standardize(df, &spec.source, output)?;
            Ok(TransformOutput {
                column: result.column,
                summary: TransformSummary::Standardize {
                    mean: result.moments.mean,
                    std_dev: result.moments.std_dev,
                    observed: result.moments.count,
                    missing: result.missing,
                },
            })
        }
        TransformKind::Encode { missing } => {
            let result = encode(df, &spec.source, output, *missing)?;
            Ok(TransformOutput {
                column: result.column,
                summary: TransformSummary::Encode {
                    vocabulary: result.vocabulary,
                    reserved: result.reserved,
                },
            })
        }
        TransformKind::Fill { value } => {
            let result = fill(df, &spec.source, output, value)?;
            Ok(TransformOutput {
                column: result.column,
                summary: TransformSummary::Fill {
                    filled: result.filled,
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_output_named_after_spec() {
        let df = DataFrame::new(vec![
            Series::new("b".into(), vec!["p", "q"]).into_column(),
        ])
        .unwrap();
        let spec = TransformSpec::encode("b").with_output("b_code");

        let output = apply_transform(&df, &spec).unwrap();

        assert_eq!(output.column.name().as_str(), "b_code");
        assert_eq!(output.column.len(), df.height());
        match output.summary {
            TransformSummary::Encode {
                vocabulary,
                reserved,
            } => {
                assert_eq!(vocabulary.len(), 2);
                assert_eq!(reserved, 0);
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }
}
