// SPDX-License-Identifier: Apache-2.0

//! CLI-specific `TokenProvider` implementation.

use secrecy::SecretString;
use stalewatch_core::auth::{TokenProvider, resolve_token};
use tracing::debug;

/// CLI implementation of `TokenProvider`.
///
/// Resolves the GitHub token from the `GITHUB_TOKEN` environment variable,
/// falling back to the token saved with `stalewatch oauth`.
pub struct CliTokenProvider {
    persisted: Option<String>,
}

impl CliTokenProvider {
    /// Creates a provider that falls back to `persisted`.
    pub fn new(persisted: Option<String>) -> Self {
        Self { persisted }
    }
}

impl TokenProvider for CliTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        if let Some((token, source)) = resolve_token(self.persisted.as_deref()) {
            debug!(%source, "Resolved GitHub token");
            Some(token)
        } else {
            debug!("No GitHub token found in CLI sources");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use stalewatch_core::auth::TOKEN_ENV_VAR;

    use super::*;

    #[test]
    #[serial]
    fn test_persisted_token_is_used_without_env() {
        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
        }
        let provider = CliTokenProvider::new(Some("ghp_saved".to_string()));
        let token = provider.github_token().unwrap();
        assert_eq!(token.expose_secret(), "ghp_saved");

        assert!(CliTokenProvider::new(None).github_token().is_none());
    }

    #[test]
    #[serial]
    fn test_env_token_wins_over_persisted() {
        unsafe {
            std::env::set_var(TOKEN_ENV_VAR, "ghp_env");
        }
        let token = CliTokenProvider::new(Some("ghp_saved".to_string())).github_token();
        unsafe {
            std::env::remove_var(TOKEN_ENV_VAR);
        }
        assert_eq!(token.unwrap().expose_secret(), "ghp_env");
    }
}
