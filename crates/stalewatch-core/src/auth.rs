// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction for credential resolution.
//!
//! The pipeline never reads credentials itself. Callers implement
//! `TokenProvider` and pass it in, so the CLI can apply its own precedence
//! rules while tests supply fixed tokens.

use secrecy::SecretString;
use tracing::{debug, instrument};

/// Environment variable that overrides the persisted token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Provides the GitHub credential for API calls.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    ///
    /// Returns `None` if no token is available from any source.
    fn github_token(&self) -> Option<SecretString>;
}

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token from the `GITHUB_TOKEN` environment variable.
    Environment,
    /// Token saved with `stalewatch oauth`.
    ConfigFile,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::ConfigFile => write!(f, "config file"),
        }
    }
}

/// Resolves a GitHub token using the priority chain.
///
/// Checks sources in order:
/// 1. `GITHUB_TOKEN` environment variable
/// 2. The persisted token from the config file
///
/// Empty values are treated as absent.
#[instrument(skip(persisted))]
pub fn resolve_token(persisted: Option<&str>) -> Option<(SecretString, TokenSource)> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
        && !token.is_empty()
    {
        debug!("Using token from GITHUB_TOKEN environment variable");
        return Some((SecretString::from(token), TokenSource::Environment));
    }

    if let Some(token) = persisted.filter(|t| !t.is_empty()) {
        debug!("Using token from config file");
        return Some((SecretString::from(token.to_string()), TokenSource::ConfigFile));
    }

    debug!("No token found in any source");
    None
}
