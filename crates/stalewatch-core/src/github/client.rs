// SPDX-License-Identifier: Apache-2.0

//! Authenticated GET requests against the GitHub REST API.
//!
//! `GitHubClient` performs one request per call and hands back the decoded
//! JSON body together with the continuation links from the response headers.
//! Pagination lives one layer up in [`super::pages`].

use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::links::PageLinks;
use crate::config::GitHubConfig;
use crate::error::StaleError;
use crate::retry::{is_retryable, retry_backoff};

/// `User-Agent` sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("stalewatch/", env!("CARGO_PKG_VERSION"));

/// Media type requested from the REST API.
const GITHUB_JSON: &str = "application/vnd.github+json";

/// One response page: the decoded body plus its continuation links.
#[derive(Debug, Clone)]
pub struct Page {
    /// Decoded JSON body.
    pub body: Value,
    /// Links parsed from the `Link` header.
    pub links: PageLinks,
}

impl Page {
    /// Builds a page from a body and links.
    #[must_use]
    pub fn new(body: Value, links: PageLinks) -> Self {
        Self { body, links }
    }

    /// Consumes the page and returns its records.
    ///
    /// Collection endpoints answer with a JSON array; anything else is a
    /// decode error attributed to `url`.
    pub fn into_items(self, url: &Url) -> crate::Result<Vec<Value>> {
        match self.body {
            Value::Array(items) => Ok(items),
            other => serde_json::from_value(other).map_err(|source| StaleError::Decode {
                url: url.to_string(),
                source,
            }),
        }
    }
}

/// Fetches a single page of a collection.
///
/// The walker and the staleness classifier are written against this trait so
/// they can run over any page source.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Issues one GET request for `url`.
    ///
    /// # Errors
    ///
    /// Returns a fetch-family [`StaleError`] on transport, status or decode
    /// failure.
    async fn fetch_page(&self, url: &Url) -> crate::Result<Page>;
}

/// GitHub REST client holding the connection pool and credentials.
pub struct GitHubClient {
    http: Client,
    authorization: HeaderValue,
    max_retries: usize,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Creates a client authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns `StaleError::Config` if the token cannot be used as a header
    /// value or the HTTP client cannot be built.
    pub fn new(token: &SecretString, config: &GitHubConfig) -> crate::Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("token {}", token.expose_secret()))
            .map_err(|_| StaleError::config("GitHub token contains invalid characters"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .build()
            .map_err(|e| StaleError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            authorization,
            max_retries: config.max_retries,
        })
    }

    async fn fetch_once(&self, url: &Url) -> crate::Result<Page> {
        let network = |source| StaleError::Network {
            url: url.to_string(),
            source,
        };

        let response = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StaleError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let links = PageLinks::from_headers(response.headers());
        let bytes = response.bytes().await.map_err(network)?;
        let body = serde_json::from_slice(&bytes).map_err(|source| StaleError::Decode {
            url: url.to_string(),
            source,
        })?;

        Ok(Page { body, links })
    }
}

#[async_trait]
impl PageFetcher for GitHubClient {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch_page(&self, url: &Url) -> crate::Result<Page> {
        debug!("Requesting page");

        (|| async { self.fetch_once(url).await })
            .retry(retry_backoff(self.max_retries))
            .when(is_retryable)
            .notify(|err, dur| {
                warn!(
                    error = %err,
                    retry_after = ?dur,
                    "Retrying GitHub request after transient failure"
                );
            })
            .await
    }
}
