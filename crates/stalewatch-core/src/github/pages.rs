// SPDX-License-Identifier: Apache-2.0

//! Forward pagination over server-linked collections.
//!
//! Each page's `next` link is only known once that page has arrived, so the
//! walk is strictly sequential. Records are returned in page order, then in
//! in-page order.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::client::PageFetcher;
use crate::error::StaleError;

/// Query parameter carrying the page size.
pub const PAGE_SIZE_PARAM: &str = "per_page";

/// Returns `seed` with `per_page` merged into its query string.
///
/// A `per_page` already present on the seed wins.
#[must_use]
pub fn with_page_size(seed: &Url, page_size: u32) -> Url {
    if seed.query_pairs().any(|(key, _)| key == PAGE_SIZE_PARAM) {
        return seed.clone();
    }
    let mut url = seed.clone();
    url.query_pairs_mut()
        .append_pair(PAGE_SIZE_PARAM, &page_size.to_string());
    url
}

/// Fetches every page reachable from `seed_url` and returns the records.
///
/// Stops when a page carries no usable `next` link. A `next` link that points
/// back at an already visited page also ends the walk. The first failing page
/// aborts the walk; no partial result is returned.
///
/// # Errors
///
/// Returns the fetch-family error of the first page that failed.
#[instrument(skip(fetcher), fields(seed = %seed_url))]
pub async fn fetch_all<F>(fetcher: &F, seed_url: &Url, page_size: u32) -> crate::Result<Vec<Value>>
where
    F: PageFetcher + ?Sized,
{
    let mut records = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(with_page_size(seed_url, page_size));
    let mut pages = 0usize;

    while let Some(url) = next.take() {
        if !visited.insert(url.clone()) {
            warn!(url = %url, "Pagination link cycles back to a visited page, stopping");
            break;
        }

        let page = fetcher.fetch_page(&url).await?;
        next = page.links.next.clone();
        records.extend(page.into_items(&url)?);
        pages += 1;
    }

    debug!(pages, records = records.len(), "Pagination complete");
    Ok(records)
}

/// Like [`fetch_all`], decoding each record into `T`.
///
/// # Errors
///
/// Returns any fetch error, or `StaleError::Decode` if a record does not
/// match `T`.
pub async fn fetch_all_as<T, F>(fetcher: &F, seed_url: &Url, page_size: u32) -> crate::Result<Vec<T>>
where
    T: DeserializeOwned,
    F: PageFetcher + ?Sized,
{
    fetch_all(fetcher, seed_url, page_size)
        .await?
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|source| StaleError::Decode {
                url: seed_url.to_string(),
                source,
            })
        })
        .collect()
}
