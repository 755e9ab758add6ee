// SPDX-License-Identifier: Apache-2.0

//! Continuation links from the `Link` response header.
//!
//! GitHub paginates collections out-of-band:
//!
//! ```text
//! Link: <https://api.github.com/...&page=2>; rel="next", <https://api.github.com/...&page=5>; rel="last"
//! ```
//!
//! A missing or malformed header is not an error. It simply yields no links,
//! which is how the last page of a collection looks.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::{HeaderMap, LINK};
use url::Url;

/// One `<url>; rel="..."` entry. The rel value may hold several
/// space-separated relation types.
static LINK_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]*)>\s*;\s*rel\s*=\s*"?([^";,]+)"?"#).expect("link entry regex is valid")
});

/// Structured continuation links of a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// The following page.
    pub next: Option<Url>,
    /// The final page.
    pub last: Option<Url>,
}

impl PageLinks {
    /// Parses the raw value of a `Link` header.
    ///
    /// Entries whose URL does not parse are skipped. When a relation appears
    /// twice, the first occurrence wins.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut links = PageLinks::default();

        for caps in LINK_ENTRY.captures_iter(header) {
            let Ok(url) = Url::parse(caps[1].trim()) else {
                continue;
            };
            for rel in caps[2].split_whitespace() {
                let slot = match rel.to_ascii_lowercase().as_str() {
                    "next" => &mut links.next,
                    "last" => &mut links.last,
                    _ => continue,
                };
                if slot.is_none() {
                    *slot = Some(url.clone());
                }
            }
        }

        links
    }

    /// Extracts links from response headers.
    ///
    /// Returns empty links when the header is absent or not valid UTF-8.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(Self::parse)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GITHUB_STYLE: &str = r#"<https://api.github.com/repositories/1/issues?per_page=100&page=2>; rel="next", <https://api.github.com/repositories/1/issues?per_page=100&page=5>; rel="last""#;

    #[test]
    fn test_parse_next_and_last() {
        let links = PageLinks::parse(GITHUB_STYLE);
        assert_eq!(
            links.next.unwrap().as_str(),
            "https://api.github.com/repositories/1/issues?per_page=100&page=2"
        );
        assert_eq!(
            links.last.unwrap().as_str(),
            "https://api.github.com/repositories/1/issues?per_page=100&page=5"
        );
    }

    #[test]
    fn test_parse_last_page_has_no_next() {
        let header = r#"<https://api.github.com/x?page=4>; rel="prev", <https://api.github.com/x?page=1>; rel="first""#;
        assert_eq!(PageLinks::parse(header), PageLinks::default());
    }

    #[test]
    fn test_parse_multiple_rel_values() {
        let links = PageLinks::parse(r#"<https://api.github.com/x?page=2>; rel="next last""#);
        assert_eq!(links.next, links.last);
        assert!(links.next.is_some());
    }

    #[test]
    fn test_parse_unquoted_rel() {
        let links = PageLinks::parse("<https://api.github.com/x?page=2>; rel=next");
        assert!(links.next.is_some());
    }

    #[test]
    fn test_parse_garbage_yields_nothing() {
        assert_eq!(PageLinks::parse("not a link header"), PageLinks::default());
        assert_eq!(PageLinks::parse(""), PageLinks::default());
        assert_eq!(
            PageLinks::parse(r#"<not a url>; rel="next""#),
            PageLinks::default()
        );
    }

    #[test]
    fn test_from_headers_missing() {
        let headers = HeaderMap::new();
        assert_eq!(PageLinks::from_headers(&headers), PageLinks::default());
    }

    #[test]
    fn test_from_headers_present() {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, GITHUB_STYLE.parse().unwrap());
        let links = PageLinks::from_headers(&headers);
        assert!(links.next.is_some());
        assert!(links.last.is_some());
    }
}
