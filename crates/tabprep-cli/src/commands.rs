use anyhow::Result;

use tabprep_cli::pipeline::{resolve_config, run_pipeline};
use tabprep_cli::types::{RunRequest, RunResult};

use crate::cli::{RunArgs, ShowConfigArgs};
use crate::summary::print_config;

pub fn run(args: &RunArgs) -> Result<RunResult> {
    let request = RunRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        config: args.config.clone(),
        assembly: args.assembly.map(Into::into),
        dry_run: args.dry_run,
        report: args.report.clone(),
    };
    run_pipeline(&request)
}

pub fn show_config(args: &ShowConfigArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref())?;
    print_config(&config);
    Ok(())
}
