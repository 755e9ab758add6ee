// SPDX-License-Identifier: Apache-2.0

//! Error types for stalewatch.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur while building a staleness report.
#[derive(Error, Debug)]
pub enum StaleError {
    /// Configuration file error or missing setting.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// No GitHub token could be resolved.
    #[error(
        "No GitHub OAuth2 token found - run `stalewatch oauth <token>` or set the GITHUB_TOKEN environment variable"
    )]
    NotAuthenticated,

    /// Repository URL is missing a usable path or points at an unknown host.
    #[error("Invalid repository URL '{url}': {reason}")]
    InvalidRepoUrl {
        /// The URL as supplied by the user.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// GitHub answered with a non-success status.
    #[error("GitHub API returned HTTP {status} for {url}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Transport-level failure from reqwest.
    #[error("Network error requesting {url}: {source}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be decoded into the expected shape.
    #[error("Unexpected response body from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl StaleError {
    /// Returns true for failures raised while talking to GitHub.
    ///
    /// These abort the pipeline; the rest are configuration problems found
    /// before any request is made.
    #[must_use]
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            StaleError::Http { .. } | StaleError::Network { .. } | StaleError::Decode { .. }
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        StaleError::Config {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for StaleError {
    fn from(err: config::ConfigError) -> Self {
        StaleError::Config {
            message: err.to_string(),
        }
    }
}
