//! CLI argument definitions for the preprocessing runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tabprep_model::AssemblyMode;

#[derive(Parser)]
#[command(
    name = "tabprep",
    version,
    about = "Tabular preprocessing - standardize, encode and fill table columns",
    long_about = "Load a Parquet or CSV table, apply an ordered pipeline of column\n\
                  transforms (standardization, categorical encoding, constant fill)\n\
                  and save the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a table, run the pipeline and save the result.
    Run(RunArgs),

    /// Print the effective pipeline configuration.
    ShowConfig(ShowConfigArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Input table (.parquet, .pq or .csv).
    #[arg(value_name = "INPUT", default_value = "data/data.parquet")]
    pub input: PathBuf,

    /// Output table (.parquet, .pq or .csv).
    #[arg(value_name = "OUTPUT", default_value = "data/preprocessed_data.parquet")]
    pub output: PathBuf,

    /// Pipeline configuration file (TOML). Uses the built-in pipeline when absent.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override how produced columns are assembled into the result.
    #[arg(long = "assembly", value_enum)]
    pub assembly: Option<AssemblyArg>,

    /// Run the pipeline without writing the output table.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a JSON run report (events, vocabularies, statistics).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Print the first ROWS rows of the result.
    #[arg(long = "preview", value_name = "ROWS")]
    pub preview: Option<usize>,
}

#[derive(Parser)]
pub struct ShowConfigArgs {
    /// Pipeline configuration file (TOML). Shows the built-in pipeline when absent.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AssemblyArg {
    /// Result holds only the produced columns.
    OutputsOnly,
    /// Produced columns are added to (or replace columns of) the input table.
    AppendToInput,
}

impl From<AssemblyArg> for AssemblyMode {
    fn from(arg: AssemblyArg) -> Self {
        match arg {
            AssemblyArg::OutputsOnly => Self::OutputsOnly,
            AssemblyArg::AppendToInput => Self::AppendToInput,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
