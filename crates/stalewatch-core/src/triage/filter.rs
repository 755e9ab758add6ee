// SPDX-License-Identifier: Apache-2.0

//! Label exclusion and staleness filtering over the full issue set.
//!
//! Label checks are local. Issues that survive them and have comments are
//! classified concurrently, with at most `concurrency` comment lookups in
//! flight. The first failed lookup aborts the whole filter.

use bon::Builder;
use chrono::{DateTime, Utc};
use futures::{StreamExt, TryStreamExt, future, stream};
use tracing::{debug, info, instrument};

use super::stale::classify;
use crate::config::{
    DEFAULT_CONCURRENCY, DEFAULT_EXCLUDE_LABELS, DEFAULT_PAGE_SIZE, DEFAULT_STALE_DAYS,
    TriageConfig,
};
use crate::github::client::PageFetcher;
use crate::github::types::{Comment, Issue};

/// An issue that survived filtering.
///
/// `comment` is present only when the issue qualified through a stale
/// comment; uncommented issues carry `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredIssue {
    /// The issue itself.
    pub issue: Issue,
    /// The most recent comment, when it made the issue stale.
    pub comment: Option<Comment>,
}

/// Parameters of a triage run.
#[derive(Debug, Clone, Builder)]
pub struct TriageOptions {
    /// Issues carrying any of these labels are dropped.
    #[builder(default = default_exclude_labels())]
    pub exclude_labels: Vec<String>,
    /// Staleness threshold in days.
    #[builder(default = DEFAULT_STALE_DAYS)]
    pub stale_days: u32,
    /// Page size for collection requests.
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
    /// Maximum concurrent comment lookups. Zero is treated as one.
    #[builder(default = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

fn default_exclude_labels() -> Vec<String> {
    DEFAULT_EXCLUDE_LABELS
        .iter()
        .map(|l| (*l).to_string())
        .collect()
}

impl From<&TriageConfig> for TriageOptions {
    fn from(config: &TriageConfig) -> Self {
        Self {
            exclude_labels: config.exclude_labels.clone(),
            stale_days: config.stale_days,
            page_size: config.page_size,
            concurrency: config.concurrency,
        }
    }
}

/// Keeps issues that carry no excluded label and are either uncommented or
/// stale at `now`.
///
/// Output order is not significant.
///
/// # Errors
///
/// Returns the first fetch error raised by a comment lookup. Remaining
/// lookups are cancelled.
#[instrument(skip_all, fields(issues = issues.len()))]
pub async fn filter_issues<F>(
    fetcher: &F,
    issues: Vec<Issue>,
    options: &TriageOptions,
    now: DateTime<Utc>,
) -> crate::Result<Vec<FilteredIssue>>
where
    F: PageFetcher + ?Sized,
{
    let total = issues.len();
    let candidates: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| {
            let excluded = issue.has_any_label(&options.exclude_labels);
            if excluded {
                debug!(number = issue.number, "Dropping issue with excluded label");
            }
            !excluded
        })
        .collect();
    let after_labels = candidates.len();

    let kept: Vec<FilteredIssue> = stream::iter(candidates)
        .map(|issue| evaluate(fetcher, issue, options, now))
        .buffer_unordered(options.concurrency.max(1))
        .try_filter_map(future::ok)
        .try_collect()
        .await?;

    info!(
        total,
        after_labels,
        kept = kept.len(),
        "Filtered issues"
    );
    Ok(kept)
}

async fn evaluate<F>(
    fetcher: &F,
    issue: Issue,
    options: &TriageOptions,
    now: DateTime<Utc>,
) -> crate::Result<Option<FilteredIssue>>
where
    F: PageFetcher + ?Sized,
{
    if issue.comments == 0 {
        return Ok(Some(FilteredIssue {
            issue,
            comment: None,
        }));
    }

    let comment = classify(
        fetcher,
        &issue.comments_url,
        options.stale_days,
        options.page_size,
        now,
    )
    .await?
    .into_comment();

    Ok(comment.map(|comment| FilteredIssue {
        issue,
        comment: Some(comment),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{TimeDelta, TimeZone};
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::error::StaleError;
    use crate::github::client::Page;
    use crate::github::links::PageLinks;
    use crate::github::pages::tests::FakeFetcher;
    use crate::github::types::Label;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn comments_url(number: u64) -> String {
        format!("https://api.github.com/repos/o/r/issues/{number}/comments")
    }

    fn issue(number: u64, comments: u64, labels: &[&str]) -> Issue {
        Issue {
            number,
            title: format!("Issue {number}"),
            comments,
            labels: labels
                .iter()
                .map(|name| Label {
                    name: (*name).to_string(),
                })
                .collect(),
            comments_url: Url::parse(&comments_url(number)).unwrap(),
        }
    }

    fn with_comment(fetcher: FakeFetcher, number: u64, age: TimeDelta) -> FakeFetcher {
        fetcher.page(
            &format!("{}?per_page=100", comments_url(number)),
            json!([{ "created_at": (now() - age).to_rfc3339() }]),
            PageLinks::default(),
        )
    }

    fn options(labels: &[&str]) -> TriageOptions {
        TriageOptions::builder()
            .exclude_labels(labels.iter().map(|l| (*l).to_string()).collect())
            .build()
    }

    fn numbers(filtered: &[FilteredIssue]) -> Vec<u64> {
        let mut numbers: Vec<u64> = filtered.iter().map(|f| f.issue.number).collect();
        numbers.sort_unstable();
        numbers
    }

    #[tokio::test]
    async fn test_wontfix_excluded_bug_kept() {
        let fetcher = FakeFetcher::default();
        let issues = vec![issue(1, 0, &["wontfix"]), issue(2, 0, &["bug"])];

        let filtered = filter_issues(&fetcher, issues, &options(&["wontfix"]), now())
            .await
            .unwrap();

        assert_eq!(numbers(&filtered), vec![2]);
        assert!(filtered[0].comment.is_none());
    }

    #[tokio::test]
    async fn test_excluded_issue_is_never_classified() {
        let fetcher = FakeFetcher::default();
        let issues = vec![issue(1, 4, &["enhancement"])];

        let filtered = filter_issues(&fetcher, issues, &options(&["enhancement"]), now())
            .await
            .unwrap();

        assert!(filtered.is_empty());
        assert_eq!(fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn test_stale_kept_fresh_dropped() {
        let fetcher = FakeFetcher::default();
        let fetcher = with_comment(fetcher, 3, TimeDelta::days(15));
        let fetcher = with_comment(fetcher, 4, TimeDelta::days(1));
        let issues = vec![issue(3, 1, &[]), issue(4, 1, &[])];

        let filtered = filter_issues(&fetcher, issues, &options(&[]), now())
            .await
            .unwrap();

        assert_eq!(numbers(&filtered), vec![3]);
        assert_eq!(
            filtered[0].comment.as_ref().unwrap().created_at,
            now() - TimeDelta::days(15)
        );
    }

    #[tokio::test]
    async fn test_comment_count_without_comments_is_dropped() {
        let fetcher = FakeFetcher::default().page(
            &format!("{}?per_page=100", comments_url(9)),
            json!([]),
            PageLinks::default(),
        );
        let filtered = filter_issues(&fetcher, vec![issue(9, 2, &[])], &options(&[]), now())
            .await
            .unwrap();
        assert!(filtered.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_aborts() {
        let fetcher = with_comment(FakeFetcher::default(), 1, TimeDelta::days(30));
        // Issue 2 has no registered comment page, so its lookup fails.
        let issues = vec![issue(1, 1, &[]), issue(2, 1, &[])];

        let err = filter_issues(&fetcher, issues, &options(&[]), now())
            .await
            .unwrap_err();
        assert!(matches!(err, StaleError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let fetcher = with_comment(FakeFetcher::default(), 1, TimeDelta::days(30));
        let options = TriageOptions::builder()
            .exclude_labels(Vec::new())
            .concurrency(0)
            .build();

        let filtered = filter_issues(&fetcher, vec![issue(1, 1, &[])], &options, now())
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
    }

    /// Answers every comment lookup with one stale comment after a short
    /// delay, recording the highest number of lookups in flight at once.
    #[derive(Default)]
    struct InFlightFetcher {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for InFlightFetcher {
        async fn fetch_page(&self, _url: &Url) -> crate::Result<Page> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(current, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let stale = now() - TimeDelta::days(30);
            Ok(Page::new(
                json!([{ "created_at": stale.to_rfc3339() }]),
                PageLinks::default(),
            ))
        }
    }

    #[tokio::test]
    async fn test_lookups_respect_concurrency_cap() {
        let fetcher = InFlightFetcher::default();
        let issues: Vec<Issue> = (1..=20).map(|n| issue(n, 1, &[])).collect();
        let options = TriageOptions::builder()
            .exclude_labels(Vec::new())
            .concurrency(3)
            .build();

        let filtered = filter_issues(&fetcher, issues, &options, now())
            .await
            .unwrap();

        assert_eq!(filtered.len(), 20);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 20);
        let peak = fetcher.peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak in-flight lookups was {peak}");
        assert!(peak > 1, "lookups never overlapped");
    }

    #[tokio::test]
    async fn test_zero_concurrency_runs_one_lookup_at_a_time() {
        let fetcher = InFlightFetcher::default();
        let issues: Vec<Issue> = (1..=4).map(|n| issue(n, 1, &[])).collect();
        let options = TriageOptions::builder()
            .exclude_labels(Vec::new())
            .concurrency(0)
            .build();

        let filtered = filter_issues(&fetcher, issues, &options, now())
            .await
            .unwrap();

        assert_eq!(filtered.len(), 4);
        assert_eq!(fetcher.peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_builder_defaults_match_config_defaults() {
        let built = TriageOptions::builder().build();
        let from_config = TriageOptions::from(&TriageConfig::default());
        assert_eq!(built.exclude_labels, from_config.exclude_labels);
        assert_eq!(built.stale_days, 10);
        assert_eq!(built.page_size, 100);
        assert_eq!(built.concurrency, from_config.concurrency);
    }
}
