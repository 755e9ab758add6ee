// SPDX-License-Identifier: Apache-2.0

//! Staleness classification for a single issue.
//!
//! The decision is driven by the most recently created comment. GitHub lists
//! comments oldest-first, so when a collection spans several pages the
//! classifier jumps to the page named by the `last` link and takes its final
//! element. At most two requests are made per issue.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, instrument};
use url::Url;

use crate::error::StaleError;
use crate::github::client::PageFetcher;
use crate::github::pages::with_page_size;
use crate::github::types::Comment;

/// Outcome of classifying one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StalenessResult {
    /// No qualifying comment: the issue has no comments, or its most recent
    /// comment is newer than the threshold.
    NoMarker,
    /// The most recent comment is at least as old as the threshold.
    StaleComment(Comment),
}

impl StalenessResult {
    /// Returns the stale comment, if any.
    #[must_use]
    pub fn into_comment(self) -> Option<Comment> {
        match self {
            StalenessResult::NoMarker => None,
            StalenessResult::StaleComment(comment) => Some(comment),
        }
    }
}

/// Returns true if a comment created at `created_at` is `stale_days` or more
/// days old at `now`.
///
/// A threshold too large to subtract from `now` never matches.
#[must_use]
pub fn is_stale_at(created_at: DateTime<Utc>, stale_days: u32, now: DateTime<Utc>) -> bool {
    TimeDelta::try_days(i64::from(stale_days))
        .and_then(|window| now.checked_sub_signed(window))
        .is_some_and(|cutoff| created_at <= cutoff)
}

/// Fetches the most recently created comment of a collection.
///
/// Returns `None` for an empty collection.
///
/// # Errors
///
/// Propagates any fetch error, or `StaleError::Decode` if the comment does
/// not carry a valid `created_at`.
pub async fn latest_comment<F>(
    fetcher: &F,
    comments_url: &Url,
    page_size: u32,
) -> crate::Result<Option<Comment>>
where
    F: PageFetcher + ?Sized,
{
    let first_url = with_page_size(comments_url, page_size);
    let first = fetcher.fetch_page(&first_url).await?;

    let (page, url) = match first.links.last.clone() {
        Some(last_url) if last_url != first_url => {
            debug!(last = %last_url, "Jumping to last comment page");
            (fetcher.fetch_page(&last_url).await?, last_url)
        }
        _ => (first, first_url),
    };

    let Some(record) = page.into_items(&url)?.pop() else {
        return Ok(None);
    };

    serde_json::from_value(record)
        .map(Some)
        .map_err(|source| StaleError::Decode {
            url: url.to_string(),
            source,
        })
}

/// Classifies one issue's comment collection against `stale_days`.
///
/// # Errors
///
/// Propagates any error from [`latest_comment`].
#[instrument(skip(fetcher, now), fields(comments_url = %comments_url))]
pub async fn classify<F>(
    fetcher: &F,
    comments_url: &Url,
    stale_days: u32,
    page_size: u32,
    now: DateTime<Utc>,
) -> crate::Result<StalenessResult>
where
    F: PageFetcher + ?Sized,
{
    let Some(comment) = latest_comment(fetcher, comments_url, page_size).await? else {
        debug!("Comment collection is empty");
        return Ok(StalenessResult::NoMarker);
    };

    if is_stale_at(comment.created_at, stale_days, now) {
        Ok(StalenessResult::StaleComment(comment))
    } else {
        debug!(created_at = %comment.created_at, "Most recent comment is fresh");
        Ok(StalenessResult::NoMarker)
    }
}
