// SPDX-License-Identifier: Apache-2.0

//! Configuration management for stalewatch.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. `GITHUB_URL` for the repository URL (the token is resolved separately
//!    through [`crate::auth::TokenProvider`])
//! 2. Environment variables (prefix: `STALEWATCH_`)
//! 3. Config file: `~/.config/stalewatch/config.toml`
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Look for issues quiet for three weeks instead of ten days
//! STALEWATCH_TRIAGE__STALE_DAYS=21 stalewatch
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::StaleError;

/// Number of days without a comment after which an issue counts as stale.
pub const DEFAULT_STALE_DAYS: u32 = 10;

/// Page size merged into every collection request.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum number of comment lookups in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Base URL of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Labels excluded when the user has not saved their own list.
pub const DEFAULT_EXCLUDE_LABELS: &[&str] = &["duplicate", "question", "wontfix"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub connection settings.
    pub github: GitHubConfig,
    /// Triage settings.
    pub triage: TriageConfig,
}

/// GitHub connection settings.
#[derive(Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Persisted OAuth token (`GITHUB_TOKEN` takes precedence).
    pub token: Option<String>,
    /// Repository URL, e.g. `https://github.com/owner/repo`.
    pub url: Option<String>,
    /// REST API base URL.
    pub api_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Retries for transient failures (0 disables retrying).
    pub max_retries: usize,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            url: None,
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout_seconds: 10,
            max_retries: 3,
        }
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("url", &self.url)
            .field("api_url", &self.api_url)
            .field("api_timeout_seconds", &self.api_timeout_seconds)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Triage settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Issues carrying any of these labels are ignored.
    pub exclude_labels: Vec<String>,
    /// Staleness threshold in days.
    pub stale_days: u32,
    /// Page size for collection requests.
    pub page_size: u32,
    /// Concurrent comment lookups.
    pub concurrency: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            exclude_labels: DEFAULT_EXCLUDE_LABELS
                .iter()
                .map(|l| (*l).to_string())
                .collect(),
            stale_days: DEFAULT_STALE_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Returns the stalewatch configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/stalewatch`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("stalewatch");
    }
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("stalewatch")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default location.
///
/// # Errors
///
/// Returns `StaleError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, StaleError> {
    load_config_from(&config_file_path())
}

/// Load application configuration from an explicit file path.
///
/// The file is optional. Environment variables use the prefix `STALEWATCH_`
/// and double underscore for nested keys (e.g., `STALEWATCH_TRIAGE__STALE_DAYS`).
/// `STALEWATCH_TRIAGE__EXCLUDE_LABELS` accepts a comma-delimited list.
///
/// # Errors
///
/// Returns `StaleError::Config` if the file is not valid TOML or a value has
/// the wrong type.
#[instrument]
pub fn load_config_from(path: &Path) -> Result<AppConfig, StaleError> {
    let config = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("STALEWATCH")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("triage.exclude_labels")
                .try_parsing(true),
        )
        .set_override_option("github.url", non_empty_env("GITHUB_URL"))?
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    debug!(?app_config, "Configuration loaded");

    Ok(app_config)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// A single persisted setting written by the `oauth`, `url` and
/// `exclude-labels` commands.
#[derive(Debug, Clone, Copy)]
pub enum Setting<'a> {
    /// GitHub OAuth token.
    Token(&'a str),
    /// Repository URL.
    RepoUrl(&'a str),
    /// Exclusion label list.
    ExcludeLabels(&'a [String]),
}

impl Setting<'_> {
    fn section_and_key(&self) -> (&'static str, &'static str) {
        match self {
            Setting::Token(_) => ("github", "token"),
            Setting::RepoUrl(_) => ("github", "url"),
            Setting::ExcludeLabels(_) => ("triage", "exclude_labels"),
        }
    }

    fn to_value(self) -> toml::Value {
        match self {
            Setting::Token(v) | Setting::RepoUrl(v) => toml::Value::String(v.to_string()),
            Setting::ExcludeLabels(labels) => toml::Value::Array(
                labels
                    .iter()
                    .map(|l| toml::Value::String(l.clone()))
                    .collect(),
            ),
        }
    }
}

/// Write one setting into the TOML file at `path`.
///
/// Other keys in the file are preserved. Creates the parent directory if it
/// does not exist.
///
/// # Errors
///
/// Returns `StaleError::Config` if the existing file cannot be parsed or the
/// new file cannot be written.
#[instrument(skip(setting), fields(path = %path.display()))]
pub fn save_setting(path: &Path, setting: Setting<'_>) -> Result<(), StaleError> {
    let mut root = if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| StaleError::config(format!("Failed to read config file: {e}")))?;
        toml::from_str::<toml::Table>(&content)
            .map_err(|e| StaleError::config(format!("Failed to parse config file: {e}")))?
    } else {
        toml::Table::new()
    };

    let (section, key) = setting.section_and_key();
    let table = root
        .entry(section)
        .or_insert(toml::Value::Table(toml::Table::new()));
    let Some(table) = table.as_table_mut() else {
        return Err(StaleError::config(format!(
            "Config key '{section}' is not a table"
        )));
    };
    table.insert(key.to_string(), setting.to_value());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| StaleError::config(format!("Failed to create config directory: {e}")))?;
    }

    let content = toml::to_string_pretty(&root)
        .map_err(|e| StaleError::config(format!("Failed to serialize config: {e}")))?;
    fs::write(path, content)
        .map_err(|e| StaleError::config(format!("Failed to write config file: {e}")))?;

    debug!(section, key, "Saved setting");
    Ok(())
}

/// Persists the GitHub token to the default config file.
///
/// # Errors
///
/// See [`save_setting`].
pub fn save_token(token: &str) -> Result<(), StaleError> {
    save_setting(&config_file_path(), Setting::Token(token))
}

/// Persists the repository URL to the default config file.
///
/// # Errors
///
/// See [`save_setting`].
pub fn save_repo_url(url: &str) -> Result<(), StaleError> {
    save_setting(&config_file_path(), Setting::RepoUrl(url))
}

/// Persists the exclusion label list to the default config file.
///
/// # Errors
///
/// See [`save_setting`].
pub fn save_exclude_labels(labels: &[String]) -> Result<(), StaleError> {
    save_setting(&config_file_path(), Setting::ExcludeLabels(labels))
}
