//! Library components of the `tabprep` command-line runner.

pub mod logging;
pub mod pipeline;
pub mod types;
