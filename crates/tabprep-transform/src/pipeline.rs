//! Ordered transform pipeline.
//!
//! A [`Pipeline`] owns an ordered list of [`TransformSpec`]s and applies each
//! of them to the **loaded** table (never to the accumulating result), then
//! assembles the produced columns according to its [`AssemblyMode`].
//!
//! # Example
//!
//! ```ignore
//! use tabprep_model::TransformSpec;
//! use tabprep_transform::Pipeline;
//!
//! let pipeline = Pipeline::new(vec![
//!     TransformSpec::standardize("feature_a"),
//!     TransformSpec::encode("feature_b").with_output("feature_b_encoded"),
//!     TransformSpec::fill("feature_c", -1_i64),
//! ])?;
//! let result = pipeline.run(&df)?;
//! ```
//!
//! A run either returns the complete result table or an error; no partially
//! assembled table ever leaves [`Pipeline::run`].

use polars::prelude::{Column, DataFrame};
use tabprep_model::{AssemblyMode, PipelineConfig, TransformSpec};

use crate::error::{Result, TransformError};
use crate::events::{PipelineEvent, PipelineObserver, TracingObserver};
use crate::executors::apply_transform;

#[derive(Debug, Clone)]
pub struct Pipeline {
    transforms: Vec<TransformSpec>,
    assembly: AssemblyMode,
}

impl Pipeline {
    /// Build a pipeline; fails on an empty list or duplicate output names.
    pub fn new(transforms: Vec<TransformSpec>) -> Result<Self> {
        Self::from_config(&PipelineConfig::new(transforms))
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transforms: config.transforms.clone(),
            assembly: config.assembly,
        })
    }

    #[must_use]
    pub fn with_assembly(mut self, assembly: AssemblyMode) -> Self {
        self.assembly = assembly;
        self
    }

    pub fn transforms(&self) -> &[TransformSpec] {
        &self.transforms
    }

    pub fn assembly(&self) -> AssemblyMode {
        self.assembly
    }

    /// Fail with [`TransformError::MissingColumn`] for the first transform
    /// whose source column is absent from `table`.
    pub fn check_columns(&self, table: &DataFrame) -> Result<()> {
        for spec in &self.transforms {
            if table.column(&spec.source).is_err() {
                return Err(TransformError::MissingColumn {
                    transform: spec.display_name(),
                    column: spec.source.clone(),
                });
            }
        }
        Ok(())
    }

    /// Run the pipeline, reporting events through `tracing`.
    pub fn run(&self, table: &DataFrame) -> Result<DataFrame> {
        self.run_observed(table, &mut TracingObserver)
    }

    /// Run the pipeline, reporting events to `observer`.
    pub fn run_observed(
        &self,
        table: &DataFrame,
        observer: &mut dyn PipelineObserver,
    ) -> Result<DataFrame> {
        observer.on_event(&PipelineEvent::RunStarted {
            transforms: self.transforms.len(),
            rows: table.height(),
            columns: table.width(),
        });

        match self.execute(table, observer) {
            Ok(result) => {
                observer.on_event(&PipelineEvent::RunCompleted {
                    rows: result.height(),
                    columns: result
                        .get_column_names()
                        .into_iter()
                        .map(ToString::to_string)
                        .collect(),
                });
                Ok(result)
            }
            Err(error) => {
                observer.on_event(&PipelineEvent::RunFailed {
                    error: error.to_string(),
                });
                Err(error)
            }
        }
    }

    fn execute(
        &self,
        table: &DataFrame,
        observer: &mut dyn PipelineObserver,
    ) -> Result<DataFrame> {
        self.check_columns(table)?;

        let mut outputs = Vec::with_capacity(self.transforms.len());
        for (index, spec) in self.transforms.iter().enumerate() {
            let output = apply_transform(table, spec)?;
            observer.on_event(&PipelineEvent::TransformApplied {
                index,
                name: spec.display_name(),
                kind: spec.kind.label(),
                source: spec.source.clone(),
                output: spec.output_name().to_string(),
                summary: output.summary,
            });
            outputs.push(output.column);
        }

        self.assemble(table, outputs)
    }

    fn assemble(&self, table: &DataFrame, outputs: Vec<Column>) -> Result<DataFrame> {
        match self.assembly {
            AssemblyMode::OutputsOnly => Ok(DataFrame::new(outputs)?),
            AssemblyMode::AppendToInput => {
                let mut result = table.clone();
                for column in outputs {
                    // Replaces in place when the name already exists.
                    result.with_column(column)?;
                }
                Ok(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use tabprep_model::ConfigError;

    use crate::events::{RecordingObserver, RunState};

    fn table() -> DataFrame {
        DataFrame::new(vec![
            Series::new("a".into(), vec![1.0, 3.0]).into_column(),
            Series::new("b".into(), vec!["q", "p"]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_pipeline_rejected() {
        let err = Pipeline::new(Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Config(ConfigError::EmptyPipeline)
        ));
    }

    #[test]
    fn test_duplicate_outputs_rejected() {
        let err = Pipeline::new(vec![
            TransformSpec::standardize("a"),
            TransformSpec::fill("a", 0.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            TransformError::Config(ConfigError::DuplicateOutput { .. })
        ));
    }

    #[test]
    fn test_missing_column_fails_before_any_transform() {
        let pipeline = Pipeline::new(vec![
            TransformSpec::standardize("a"),
            TransformSpec::encode("absent"),
        ])
        .unwrap();
        let mut observer = RecordingObserver::new();

        let err = pipeline.run_observed(&table(), &mut observer).unwrap_err();

        assert!(matches!(err, TransformError::MissingColumn { .. }));
        assert_eq!(observer.state(), RunState::Failed);
        // Started, then failed: no transform was applied.
        assert_eq!(observer.events().len(), 2);
    }

    #[test]
    fn test_outputs_only_assembly() {
        let pipeline = Pipeline::new(vec![
            TransformSpec::encode("b").with_output("b_code"),
            TransformSpec::standardize("a"),
        ])
        .unwrap();

        let result = pipeline.run(&table()).unwrap();

        assert_eq!(result.get_column_names_str(), vec!["b_code", "a"]);
        let a: Vec<Option<f64>> = result.column("a").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(a, vec![Some(-1.0), Some(1.0)]);
    }

    #[test]
    fn test_append_to_input_assembly() {
        let pipeline = Pipeline::new(vec![
            TransformSpec::standardize("a"),
            TransformSpec::encode("b").with_output("b_code"),
        ])
        .unwrap()
        .with_assembly(AssemblyMode::AppendToInput);

        let result = pipeline.run(&table()).unwrap();

        assert_eq!(result.get_column_names_str(), vec!["a", "b", "b_code"]);
        let a: Vec<Option<f64>> = result.column("a").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(a, vec![Some(-1.0), Some(1.0)]);
        let b = result.column("b").unwrap().str().unwrap();
        assert_eq!(b.get(0), Some("q"));
    }

    #[test]
    fn test_transforms_read_loaded_table() {
        // The fill reads the original "a", not the standardized one.
        let pipeline = Pipeline::new(vec![
            TransformSpec::standardize("a"),
            TransformSpec::fill("a", 0.0).with_output("a_filled"),
        ])
        .unwrap();

        let result = pipeline.run(&table()).unwrap();

        let filled: Vec<Option<f64>> = result
            .column("a_filled")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(filled, vec![Some(1.0), Some(3.0)]);
    }
}
