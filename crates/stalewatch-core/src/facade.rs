// SPDX-License-Identifier: Apache-2.0

//! High-level entry points for the CLI.
//!
//! These functions resolve the repository and credentials from an explicit
//! configuration value, build the client, and run the pipeline. Callers
//! implement `TokenProvider` to supply the token from their own sources.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use url::Url;

use crate::auth::TokenProvider;
use crate::config::AppConfig;
use crate::error::StaleError;
use crate::github::Repository;
use crate::github::client::{GitHubClient, PageFetcher};
use crate::github::pages::fetch_all_as;
use crate::github::types::Issue;
use crate::report::{Report, build_report};
use crate::triage::{TriageOptions, filter_issues};

/// Builds the staleness report for the configured repository.
///
/// The repository URL is validated before the token is requested, so a bad
/// URL is reported even when no credential is set up yet.
///
/// # Errors
///
/// Returns an error if:
/// - No repository URL is configured or it fails validation
/// - The provider has no GitHub token
/// - Any GitHub request fails
#[instrument(skip_all, fields(repo = ?config.github.url))]
pub async fn stale_report(provider: &dyn TokenProvider, config: &AppConfig) -> crate::Result<Report> {
    let repo_url = config
        .github
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| {
            StaleError::config(
                "No repository URL configured - run `stalewatch url <url>` or set GITHUB_URL",
            )
        })?;
    let repository = Repository::parse(repo_url)?;
    let issues_url = repository.issues_url(&config.github.api_url)?;

    let token = provider
        .github_token()
        .ok_or(StaleError::NotAuthenticated)?;
    let client = GitHubClient::new(&token, &config.github)?;

    let options = TriageOptions::from(&config.triage);
    run_pipeline(&client, &issues_url, &options, Utc::now()).await
}

/// Runs walk, filter and sort against any page source.
///
/// `now` is used for both the staleness decision and the reported ages.
///
/// # Errors
///
/// Returns the first fetch or decode error; no partial report is produced.
#[instrument(skip(fetcher, options, now), fields(issues_url = %issues_url))]
pub async fn run_pipeline<F>(
    fetcher: &F,
    issues_url: &Url,
    options: &TriageOptions,
    now: DateTime<Utc>,
) -> crate::Result<Report>
where
    F: PageFetcher + ?Sized,
{
    let issues: Vec<Issue> = fetch_all_as(fetcher, issues_url, options.page_size).await?;
    info!(count = issues.len(), "Fetched open issues");

    let filtered = filter_issues(fetcher, issues, options, now).await?;
    let rows = build_report(&filtered, now);

    Ok(Report {
        issues_url: issues_url.clone(),
        rows,
    })
}
