//! Table loading.
//!
//! Reads a persisted columnar dataset into a Polars [`DataFrame`]. The on-disk
//! format is picked from the file extension (see [`TableFormat`]).
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabprep_ingest::load_table;
//!
//! let df = load_table(Path::new("data/data.parquet"))?;
//! ```
//!
//! [`DataFrame`]: polars::prelude::DataFrame
//! [`TableFormat`]: tabprep_model::TableFormat

mod error;
mod reader;

pub use error::{LoadError, Result};
pub use reader::{load_table, load_table_as};
