// SPDX-License-Identifier: Apache-2.0

//! Stalewatch - find neglected open GitHub issues.
//!
//! A CLI tool that lists open issues nobody has answered, or whose latest
//! comment has gone quiet for longer than the staleness threshold.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod provider;

pub use provider::CliTokenProvider;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, OutputContext};
use crate::commands::ReportArgs;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet);

    match run(cli, output_ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output_ctx: OutputContext) -> Result<()> {
    let args = ReportArgs {
        repo: cli.repo,
        stale_days: cli.stale_days,
    };
    commands::run(cli.command, output_ctx, args).await
}
