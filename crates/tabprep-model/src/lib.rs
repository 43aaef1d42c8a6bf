//! Configuration model for the tabular preprocessing pipeline.
//!
//! - **config**: transform specifications and the pipeline configuration document
//! - **format**: on-disk table format detection
//! - **error**: configuration errors

pub mod config;
pub mod error;
pub mod format;

pub use config::{
    AssemblyMode, FillValue, MissingCategoryPolicy, PipelineConfig, TransformKind, TransformSpec,
    load_pipeline_config,
};
pub use error::{ConfigError, Result};
pub use format::TableFormat;
