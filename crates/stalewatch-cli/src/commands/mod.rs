// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the stalewatch CLI.

pub mod completion;
pub mod report;
pub mod settings;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{Commands, CompletionCommand, OutputContext};
use crate::output;

pub use report::ReportArgs;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        s.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Dispatch to the appropriate command handler.
///
/// Only the report loads the configuration; the other commands work even
/// when the config file is invalid.
pub async fn run(command: Option<Commands>, ctx: OutputContext, args: ReportArgs) -> Result<()> {
    match command {
        None => {
            let spinner = maybe_spinner(&ctx, "Scanning open issues...");
            let result = report::run(args).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }
            output::render(&result?, &ctx)
        }

        Some(Commands::Oauth { token }) => {
            let saved = settings::run_oauth(&token)?;
            output::render(&saved, &ctx)
        }

        Some(Commands::Url { url }) => {
            let saved = settings::run_url(&url)?;
            output::render(&saved, &ctx)
        }

        Some(Commands::ExcludeLabels { labels }) => {
            let saved = settings::run_exclude_labels(&labels)?;
            output::render(&saved, &ctx)
        }

        Some(Commands::Completion(CompletionCommand::Generate { shell })) => {
            completion::run_generate(shell)
        }
    }
}
