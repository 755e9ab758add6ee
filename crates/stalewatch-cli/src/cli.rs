// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for stalewatch.
//!
//! Uses clap's derive API. Running without a subcommand produces the report;
//! the subcommands persist settings for later runs.

use std::io::IsTerminal;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the generate subcommand with shell-specific examples.
const COMPLETION_GENERATE_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(stalewatch completion generate bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      stalewatch completion generate zsh > ~/.zsh/completions/_stalewatch

  fish
    Generate completion file:
      stalewatch completion generate fish > ~/.config/fish/completions/stalewatch.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table with colors (default)
    #[default]
    Text,
    /// Markdown table for pasting into GitHub
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, markdown)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, confirmations)
    pub quiet: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// Stalewatch - find neglected open GitHub issues.
///
/// Lists open issues that nobody has commented on, or whose most recent
/// comment is older than the staleness threshold.
#[derive(Parser)]
#[command(name = "stalewatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format (text, markdown)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, confirmations)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Repository URL for this run (overrides the saved URL)
    #[arg(long, value_name = "URL")]
    pub repo: Option<String>,

    /// Days without a comment before an issue counts as stale
    #[arg(long, value_name = "DAYS")]
    pub stale_days: Option<u32>,

    /// Subcommand to execute (omit to print the report)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Save the GitHub OAuth2 token used for API requests
    Oauth {
        /// Personal access token
        token: String,
    },

    /// Save the repository to report on
    Url {
        /// Repository URL, e.g. <https://github.com/owner/repo>
        url: String,
    },

    /// Save the labels whose issues are ignored
    ExcludeLabels {
        /// Comma-delimited label names, e.g. "wontfix,duplicate"
        labels: String,
    },

    /// Generate shell completion scripts
    #[command(subcommand)]
    Completion(CompletionCommand),
}

/// Completion subcommands
#[derive(Subcommand)]
pub enum CompletionCommand {
    /// Generate completion script for a shell (output to stdout)
    #[command(after_long_help = COMPLETION_GENERATE_HELP)]
    Generate {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_runs_report() {
        let cli = Cli::try_parse_from(["stalewatch", "--stale-days", "21"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.stale_days, Some(21));
    }

    #[test]
    fn test_exclude_labels_subcommand() {
        let cli = Cli::try_parse_from(["stalewatch", "exclude-labels", "bug,wontfix"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::ExcludeLabels { ref labels }) if labels == "bug,wontfix"
        ));
    }

    #[test]
    fn test_non_interactive_when_quiet() {
        let ctx = OutputContext {
            format: OutputFormat::Text,
            quiet: true,
            is_tty: true,
        };
        assert!(!ctx.is_interactive());
    }
}
