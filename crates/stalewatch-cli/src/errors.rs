// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `StaleError` and appends a remediation tip
//! for each failure kind. Anything else is printed with its context chain.

use anyhow::Error;
use stalewatch_core::error::StaleError;

/// Formats an error for CLI display with helpful hints.
pub fn format_error(error: &Error) -> String {
    let Some(stale_err) = error.downcast_ref::<StaleError>() else {
        return format!("{error:#}");
    };

    let tip = match stale_err {
        StaleError::NotAuthenticated => {
            "Create a token at https://github.com/settings/tokens, then run `stalewatch oauth <token>`."
                .to_string()
        }
        StaleError::Config { .. } => format!(
            "Check your config file at {}",
            stalewatch_core::config::config_file_path().display()
        ),
        StaleError::InvalidRepoUrl { .. } => {
            "Use the form https://github.com/<owner>/<repo>, e.g. `stalewatch url https://github.com/rust-lang/rust`."
                .to_string()
        }
        StaleError::Http { status, .. } => http_tip(*status).to_string(),
        StaleError::Network { .. } => "Check your internet connection and try again.".to_string(),
        StaleError::Decode { .. } => {
            "GitHub returned a response stalewatch could not read. Try again in a moment."
                .to_string()
        }
    };

    format!("{stale_err}\n\nTip: {tip}")
}

fn http_tip(status: u16) -> &'static str {
    match status {
        401 => "Your GitHub token was rejected. Save a new one with `stalewatch oauth <token>`.",
        403 | 429 => {
            "GitHub refused or rate limited the request. Wait a few minutes, or check the token's scopes."
        }
        404 => "Check the repository URL, and that your token can read the repository.",
        _ => "GitHub may be having trouble. Try again in a moment.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authenticated_has_tip() {
        let err = Error::new(StaleError::NotAuthenticated);
        let msg = format_error(&err);
        assert!(msg.contains("GITHUB_TOKEN"));
        assert!(msg.contains("Tip: Create a token"));
    }

    #[test]
    fn test_http_404_tip() {
        let err = Error::new(StaleError::Http {
            url: "https://api.github.com/repos/o/r/issues".to_string(),
            status: 404,
        });
        let msg = format_error(&err);
        assert!(msg.contains("HTTP 404"));
        assert!(msg.contains("Check the repository URL"));
    }

    #[test]
    fn test_downcast_through_context() {
        let err = Error::new(StaleError::Config {
            message: "bad toml".to_string(),
        })
        .context("Failed to load configuration");
        let msg = format_error(&err);
        assert!(msg.contains("bad toml"));
        assert!(msg.contains("Tip: Check your config file"));
    }

    #[test]
    fn test_other_errors_keep_chain() {
        let err = anyhow::anyhow!("inner").context("outer");
        assert_eq!(format_error(&err), "outer: inner");
    }
}
