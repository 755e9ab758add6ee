// SPDX-License-Identifier: Apache-2.0

//! Issue triage: staleness classification and label filtering.

pub mod filter;
pub mod stale;

pub use filter::{FilteredIssue, TriageOptions, filter_issues};
pub use stale::{StalenessResult, classify, is_stale_at, latest_comment};
