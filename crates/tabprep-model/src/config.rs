//! Pipeline configuration.
//!
//! A pipeline is configured as an ordered list of transform specifications.
//! Each specification names the transform kind, the source column it reads,
//! the output column it produces, and any kind-specific parameters.
//!
//! # Example
//!
//! ```
//! use tabprep_model::PipelineConfig;
//!
//! let config = PipelineConfig::from_toml_str(r#"
//!     [[transform]]
//!     kind = "standardize"
//!     source = "feature_a"
//!
//!     [[transform]]
//!     kind = "fill"
//!     source = "feature_c"
//!     value = -1
//! "#).unwrap();
//!
//! assert_eq!(config.transforms.len(), 2);
//! assert_eq!(config.transforms[1].output_name(), "feature_c");
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// How an encoding transform treats missing entries in its source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCategoryPolicy {
    /// Fail the run at the first missing entry.
    #[default]
    Error,
    /// Assign the reserved code (one past the last category).
    Reserve,
}

/// Constant substituted for missing entries by a fill transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl FillValue {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "\"{v}\""),
        }
    }
}

impl From<i64> for FillValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FillValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FillValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FillValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// Transform kind and its kind-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformKind {
    /// Z-score standardization of a numeric column.
    Standardize,

    /// Integer label per distinct category.
    Encode {
        #[serde(default)]
        missing: MissingCategoryPolicy,
    },

    /// Constant substitution for missing entries.
    Fill { value: FillValue },
}

impl TransformKind {
    /// Returns the configuration name of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standardize => "standardize",
            Self::Encode { .. } => "encode",
            Self::Fill { .. } => "fill",
        }
    }

    /// Returns a human-readable parameter description, if the kind has parameters.
    pub fn parameters(&self) -> Option<String> {
        match self {
            Self::Standardize => None,
            Self::Encode { missing } => Some(format!(
                "missing={}",
                match missing {
                    MissingCategoryPolicy::Error => "error",
                    MissingCategoryPolicy::Reserve => "reserve",
                }
            )),
            Self::Fill { value } => Some(format!("value={value}")),
        }
    }
}

/// A single configured transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformSpec {
    /// Optional display name; defaults to `<kind>:<source>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Column read from the loaded table.
    pub source: String,

    /// Column produced in the result; defaults to the source name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(flatten)]
    pub kind: TransformKind,
}

impl TransformSpec {
    pub fn new(source: impl Into<String>, kind: TransformKind) -> Self {
        Self {
            name: None,
            source: source.into(),
            output: None,
            kind,
        }
    }

    pub fn standardize(source: impl Into<String>) -> Self {
        Self::new(source, TransformKind::Standardize)
    }

    /// Encoding transform that fails on missing entries.
    pub fn encode(source: impl Into<String>) -> Self {
        Self::new(
            source,
            TransformKind::Encode {
                missing: MissingCategoryPolicy::Error,
            },
        )
    }

    pub fn fill(source: impl Into<String>, value: impl Into<FillValue>) -> Self {
        Self::new(
            source,
            TransformKind::Fill {
                value: value.into(),
            },
        )
    }

    /// Set the output column name.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name of the column this transform produces.
    pub fn output_name(&self) -> &str {
        self.output.as_deref().unwrap_or(&self.source)
    }

    /// Display name used in logs and reports.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}:{}", self.kind.label(), self.source),
        }
    }
}

/// How produced columns are assembled into the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyMode {
    /// Result holds only the produced columns, in transform order.
    #[default]
    OutputsOnly,
    /// Result is the input table with produced columns appended; an output
    /// that names an existing input column replaces it in place.
    AppendToInput,
}

impl AssemblyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OutputsOnly => "outputs_only",
            Self::AppendToInput => "append_to_input",
        }
    }
}

/// A complete pipeline configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub assembly: AssemblyMode,

    #[serde(rename = "transform", default)]
    pub transforms: Vec<TransformSpec>,
}

impl PipelineConfig {
    pub fn new(transforms: Vec<TransformSpec>) -> Self {
        Self {
            assembly: AssemblyMode::default(),
            transforms,
        }
    }

    /// The stock preprocessing pipeline: standardize `feature_a`, encode
    /// `feature_b` into `feature_b_encoded`, fill `feature_c` with `-1`.
    pub fn default_preprocessing() -> Self {
        Self::new(vec![
            TransformSpec::standardize("feature_a"),
            TransformSpec::encode("feature_b").with_output("feature_b_encoded"),
            TransformSpec::fill("feature_c", -1_i64),
        ])
    }

    #[must_use]
    pub fn with_assembly(mut self, assembly: AssemblyMode) -> Self {
        self.assembly = assembly;
        self
    }

    /// Parse a TOML document without validating the pipeline itself.
    ///
    /// Keys that no setting understands are rejected with
    /// [`ConfigError::UnknownField`].
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let document: toml::Table = contents.parse().map_err(ConfigError::Toml)?;
        check_known_fields(&document)?;
        toml::Value::Table(document)
            .try_into()
            .map_err(ConfigError::Toml)
    }

    /// Check that the pipeline is non-empty and output names are unique.
    pub fn validate(&self) -> Result<()> {
        if self.transforms.is_empty() {
            return Err(ConfigError::EmptyPipeline);
        }
        let mut seen = BTreeSet::new();
        for spec in &self.transforms {
            if !seen.insert(spec.output_name()) {
                return Err(ConfigError::DuplicateOutput {
                    column: spec.output_name().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Read, parse and validate a pipeline configuration file.
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = PipelineConfig::from_toml_str(&contents).map_err(|error| match error {
        ConfigError::Toml(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    config.validate()?;
    Ok(config)
}

/// Top-level keys of a pipeline document.
const PIPELINE_FIELDS: [&str; 2] = ["assembly", "transform"];

/// Keys every `[[transform]]` table may carry.
const TRANSFORM_FIELDS: [&str; 4] = ["kind", "name", "source", "output"];

/// Keys specific to one transform kind.
fn kind_fields(kind: &str) -> &'static [&'static str] {
    match kind {
        "encode" => &["missing"],
        "fill" => &["value"],
        _ => &[],
    }
}

// `#[serde(flatten)]` on `TransformSpec` rules out `deny_unknown_fields`.
fn check_known_fields(document: &toml::Table) -> Result<()> {
    if let Some(field) = document
        .keys()
        .find(|key| !PIPELINE_FIELDS.contains(&key.as_str()))
    {
        return Err(ConfigError::UnknownField {
            location: "pipeline".to_string(),
            field: field.clone(),
        });
    }

    let Some(toml::Value::Array(transforms)) = document.get("transform") else {
        return Ok(());
    };
    for (index, transform) in transforms.iter().enumerate() {
        let Some(table) = transform.as_table() else {
            continue;
        };
        let extra = table
            .get("kind")
            .and_then(toml::Value::as_str)
            .map_or(&[][..], kind_fields);
        if let Some(field) = table
            .keys()
            .find(|key| !TRANSFORM_FIELDS.contains(&key.as_str()) && !extra.contains(&key.as_str()))
        {
            return Err(ConfigError::UnknownField {
                location: format!("transform #{}", index + 1),
                field: field.clone(),
            });
        }
    }
    Ok(())
}
