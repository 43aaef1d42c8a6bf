//! Table writing.
//!
//! Persists a Polars [`DataFrame`] as Parquet or CSV. Writes go to a
//! temporary sibling file that is renamed over the destination once complete,
//! so a failed save never leaves a partial table behind.
//!
//! [`DataFrame`]: polars::prelude::DataFrame

mod error;
mod writer;

pub use error::{Result, SaveError};
pub use writer::{save_table, save_table_as};
