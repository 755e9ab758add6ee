// SPDX-License-Identifier: Apache-2.0

//! Report rows and their ordering.
//!
//! Rows are ordered so uncommented issues come first (by ascending number),
//! followed by stale issues from oldest to newest comment. Rows with equal
//! age fall back to ascending number, which makes the order total and the
//! output independent of the order lookups finished in.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use url::Url;

use crate::triage::FilteredIssue;

const SECONDS_PER_DAY: u64 = 86_400;

/// Age of an issue's most recent comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    /// The issue has no comment to measure from.
    Unknown,
    /// Whole days since the comment was created.
    Days(u64),
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Unknown => write!(f, "--"),
            Age::Days(days) => write!(f, "{days}"),
        }
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Issue number.
    pub number: u64,
    /// Comment count reported by GitHub.
    pub comment_count: u64,
    /// Age of the stale comment, or unknown for uncommented issues.
    pub age: Age,
    /// Full issue title.
    pub title: String,
}

/// A finished report: the endpoint it was built from and its sorted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Issues collection the report was built from.
    pub issues_url: Url,
    /// Rows in report order.
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Number of rows.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no issue needs attention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Days between `created_at` and `now`, rounded to the nearest whole day.
#[must_use]
pub fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let seconds = (now - created_at).num_seconds().unsigned_abs();
    (seconds + SECONDS_PER_DAY / 2) / SECONDS_PER_DAY
}

/// Report ordering.
///
/// Unknown age sorts before any known age. Two unknown ages compare by
/// number; two known ages compare by age descending, then by number.
#[must_use]
pub fn compare_rows(a: &ReportRow, b: &ReportRow) -> Ordering {
    match (a.age, b.age) {
        (Age::Unknown, Age::Unknown) => a.number.cmp(&b.number),
        (Age::Unknown, Age::Days(_)) => Ordering::Less,
        (Age::Days(_), Age::Unknown) => Ordering::Greater,
        (Age::Days(x), Age::Days(y)) => y.cmp(&x).then_with(|| a.number.cmp(&b.number)),
    }
}

/// Maps filtered issues to rows and sorts them.
#[must_use]
pub fn build_report(filtered: &[FilteredIssue], now: DateTime<Utc>) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = filtered
        .iter()
        .map(|f| ReportRow {
            number: f.issue.number,
            comment_count: f.issue.comments,
            age: f
                .comment
                .as_ref()
                .map_or(Age::Unknown, |c| Age::Days(age_in_days(c.created_at, now))),
            title: f.issue.title.clone(),
        })
        .collect();
    rows.sort_by(compare_rows);
    rows
}
