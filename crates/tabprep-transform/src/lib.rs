//! Column transforms and the transform pipeline.
//!
//! This crate provides the preprocessing core:
//!
//! - **standardize**: z-score standardization of a numeric column
//! - **encode**: integer label encoding against a sorted [`CategoryVocabulary`]
//! - **fill**: constant substitution for missing entries
//! - **executors**: dispatch from a [`TransformSpec`] to the matching transform
//! - **pipeline**: ordered application of transforms and result assembly
//! - **events**: structured run events and the observer hook
//!
//! Every transform reads one named column of the loaded table and produces
//! exactly one column of the same height. Transforms never see each other's
//! outputs.
//!
//! [`TransformSpec`]: tabprep_model::TransformSpec

pub mod encode;
pub mod error;
pub mod events;
pub mod executors;
pub mod fill;
pub mod pipeline;
pub mod standardize;
mod values;
pub mod vocabulary;

pub use encode::{Encoded, encode};
pub use error::{Result, TransformError};
pub use events::{PipelineEvent, PipelineObserver, RecordingObserver, RunState, TracingObserver};
pub use executors::{TransformOutput, TransformSummary, apply_transform};
pub use fill::{Filled, fill};
pub use pipeline::Pipeline;
pub use standardize::{Moments, Standardized, standardize};
pub use vocabulary::{CategoryKey, CategoryVocabulary};
