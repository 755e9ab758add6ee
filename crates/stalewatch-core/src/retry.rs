// SPDX-License-Identifier: Apache-2.0

//! Retry logic with exponential backoff for transient failures.
//!
//! Only transport failures and a handful of server-side statuses are retried.
//! Client errors (bad token, unknown repository) fail immediately, and a
//! retried request returns exactly what a first-try success would have, so
//! retrying never changes the report.

use std::time::Duration;

use backon::ExponentialBuilder;

use crate::error::StaleError;

/// Determines if an HTTP status code is retryable.
///
/// Retryable status codes are:
/// - 429 (Too Many Requests / Rate Limited)
/// - 500 (Internal Server Error)
/// - 502 (Bad Gateway)
/// - 503 (Service Unavailable)
/// - 504 (Gateway Timeout)
#[must_use]
pub fn is_retryable_http(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Determines if a pipeline error is worth another attempt.
///
/// Timeouts, connection failures and retryable HTTP statuses qualify.
/// Decode and configuration errors never do.
#[must_use]
pub fn is_retryable(e: &StaleError) -> bool {
    match e {
        StaleError::Http { status, .. } => is_retryable_http(*status),
        StaleError::Network { source, .. } => source.is_timeout() || source.is_connect(),
        _ => false,
    }
}

/// Creates a configured exponential backoff builder for retries.
///
/// - Factor: 2 (exponential growth)
/// - Min delay: 1 second
/// - Max times: `max_times` retries after the first attempt
/// - Jitter: enabled
#[must_use]
pub fn retry_backoff(max_times: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_factor(2.0)
        .with_min_delay(Duration::from_secs(1))
        .with_max_times(max_times)
        .with_jitter()
}

#[cfg(test)]
mod tests {
    use backon::BackoffBuilder;

    use super::*;

    #[test]
    fn test_is_retryable_http_retryable_codes() {
        assert!(is_retryable_http(429));
        assert!(is_retryable_http(500));
        assert!(is_retryable_http(502));
        assert!(is_retryable_http(503));
        assert!(is_retryable_http(504));
    }

    #[test]
    fn test_is_retryable_http_non_retryable_codes() {
        assert!(!is_retryable_http(200));
        assert!(!is_retryable_http(400));
        assert!(!is_retryable_http(401));
        assert!(!is_retryable_http(403));
        assert!(!is_retryable_http(404));
    }

    #[test]
    fn test_is_retryable_stale_error() {
        let server_error = StaleError::Http {
            url: "https://api.github.com/x".to_string(),
            status: 503,
        };
        assert!(is_retryable(&server_error));

        let not_found = StaleError::Http {
            url: "https://api.github.com/x".to_string(),
            status: 404,
        };
        assert!(!is_retryable(&not_found));

        assert!(!is_retryable(&StaleError::NotAuthenticated));
    }

    #[test]
    fn test_retry_backoff_zero_disables_retries() {
        assert!(retry_backoff(0).build().next().is_none());
    }

    #[test]
    fn test_retry_backoff_yields_max_times_delays() {
        let delays: Vec<Duration> = retry_backoff(3).build().collect();
        assert_eq!(delays.len(), 3);
        assert!(delays.iter().all(|d| *d >= Duration::from_secs(1)));
    }
}
