// SPDX-License-Identifier: Apache-2.0

//! Default command: build the staleness report.

use anyhow::{Context, Result};
use stalewatch_core::config::load_config;
use stalewatch_core::{AppConfig, Report, stale_report};
use tracing::debug;

use crate::CliTokenProvider;

/// Per-run overrides taken from the command line.
#[derive(Debug, Default)]
pub struct ReportArgs {
    /// Repository URL used instead of the saved one.
    pub repo: Option<String>,
    /// Staleness threshold in days.
    pub stale_days: Option<u32>,
}

/// Loads the configuration and builds the report for its repository.
pub async fn run(args: ReportArgs) -> Result<Report> {
    let mut config = load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");
    apply_overrides(&mut config, args);

    let provider = CliTokenProvider::new(config.github.token.clone());
    let report = stale_report(&provider, &config).await?;
    debug!(rows = report.count(), "Report ready");
    Ok(report)
}

fn apply_overrides(config: &mut AppConfig, args: ReportArgs) {
    if let Some(repo) = args.repo {
        debug!("Overriding repository URL to: {repo}");
        config.github.url = Some(repo);
    }

    if let Some(days) = args.stale_days {
        debug!("Overriding staleness threshold to: {days} days");
        config.triage.stale_days = days;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_loaded_values() {
        let mut config = AppConfig::default();
        config.github.url = Some("https://github.com/saved/repo".to_string());

        apply_overrides(
            &mut config,
            ReportArgs {
                repo: Some("https://github.com/o/r".to_string()),
                stale_days: Some(30),
            },
        );

        assert_eq!(config.github.url.as_deref(), Some("https://github.com/o/r"));
        assert_eq!(config.triage.stale_days, 30);
    }

    #[test]
    fn test_absent_overrides_keep_loaded_values() {
        let mut config = AppConfig::default();
        config.github.url = Some("https://github.com/saved/repo".to_string());

        apply_overrides(&mut config, ReportArgs::default());

        assert_eq!(
            config.github.url.as_deref(),
            Some("https://github.com/saved/repo")
        );
        assert_eq!(config.triage.stale_days, 10);
    }
}
