// SPDX-License-Identifier: Apache-2.0

//! REST payloads consumed by the pipeline.
//!
//! Only the fields stalewatch reads are declared; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

/// An open issue as returned by `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    /// Issue number, unique within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Number of comments on the issue.
    #[serde(default)]
    pub comments: u64,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// API URL of the issue's comment collection.
    pub comments_url: Url,
}

impl Issue {
    /// Returns true if any label exactly matches (case-sensitive) an entry
    /// in `excluded`.
    #[must_use]
    pub fn has_any_label(&self, excluded: &[String]) -> bool {
        self.labels
            .iter()
            .any(|label| excluded.iter().any(|e| *e == label.name))
    }
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,
}

/// An issue comment. Only the creation time matters for staleness.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}
