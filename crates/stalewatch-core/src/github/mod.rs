// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides repository URL validation, the REST client and the pagination
//! walker built on top of it.

use url::Url;

use crate::error::StaleError;

pub mod client;
pub mod links;
pub mod pages;
pub mod types;

/// Host every repository URL must belong to.
pub const GITHUB_HOST: &str = "github.com";

/// A repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Account or organization owning the repository.
    pub owner: String,
    /// Repository name without any `.git` suffix.
    pub name: String,
}

impl Repository {
    /// Parses a repository URL such as `https://github.com/owner/repo`.
    ///
    /// The URL must use `https` and its host's last two DNS labels must be
    /// `github.com`. A trailing `.git` on the repository name is stripped.
    /// Path segments after the repository name (`/issues`, `/tree/main`) are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `StaleError::InvalidRepoUrl` describing the first check that
    /// failed.
    pub fn parse(input: &str) -> crate::Result<Self> {
        let invalid = |reason: &str| StaleError::InvalidRepoUrl {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(input.trim()).map_err(|_| invalid("not an absolute URL"))?;

        if url.scheme() != "https" {
            return Err(invalid("only https URLs are supported"));
        }

        let host = url.host_str().unwrap_or_default();
        if !is_github_host(host) {
            return Err(invalid("host must be github.com"));
        }

        let mut segments = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty());
        let (Some(owner), Some(name)) = (segments.next(), segments.next()) else {
            return Err(invalid("expected https://github.com/<owner>/<repo>"));
        };

        let name = name.strip_suffix(".git").unwrap_or(name);
        if name.is_empty() {
            return Err(invalid("repository name is empty"));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Returns the open-issues collection endpoint under `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `StaleError::Config` if `api_url` is not a valid base URL.
    pub fn issues_url(&self, api_url: &str) -> crate::Result<Url> {
        let base = api_url.trim_end_matches('/');
        let endpoint = format!("{base}/repos/{}/{}/issues", self.owner, self.name);
        Url::parse(&endpoint)
            .map_err(|e| StaleError::config(format!("Invalid GitHub API URL '{api_url}': {e}")))
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Compares the last two DNS labels of `host` against [`GITHUB_HOST`].
fn is_github_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let labels: Vec<&str> = host.rsplit('.').take(2).collect();
    labels.len() == 2 && format!("{}.{}", labels[1], labels[0]) == GITHUB_HOST
}
