// SPDX-License-Identifier: Apache-2.0

//! Commands that persist settings to the config file.

use std::path::PathBuf;

use anyhow::{Result, bail};
use stalewatch_core::Repository;
use stalewatch_core::config::{
    config_file_path, save_exclude_labels, save_repo_url, save_token,
};

/// Confirmation returned by the settings commands.
#[derive(Debug)]
pub struct SettingSaved {
    /// What was saved, for display.
    pub description: String,
    /// File the setting was written to.
    pub path: PathBuf,
}

impl SettingSaved {
    fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            path: config_file_path(),
        }
    }
}

/// Saves the GitHub token.
pub fn run_oauth(token: &str) -> Result<SettingSaved> {
    let token = token.trim();
    if token.is_empty() {
        bail!("GitHub token must not be empty");
    }
    save_token(token)?;
    Ok(SettingSaved::new("GitHub token"))
}

/// Validates and saves the repository URL.
pub fn run_url(url: &str) -> Result<SettingSaved> {
    let url = url.trim();
    let repository = Repository::parse(url)?;
    save_repo_url(url)?;
    Ok(SettingSaved::new(format!("Repository {repository}")))
}

/// Saves the comma-delimited exclusion label list.
pub fn run_exclude_labels(input: &str) -> Result<SettingSaved> {
    let labels = parse_labels(input);
    save_exclude_labels(&labels)?;

    let description = if labels.is_empty() {
        "Empty exclusion list".to_string()
    } else {
        format!("Excluded labels: {}", labels.join(", "))
    };
    Ok(SettingSaved::new(description))
}

/// Splits on commas, trims each entry and drops empty ones.
fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
