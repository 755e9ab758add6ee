// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Stalewatch Core
//!
//! Core library for the stalewatch CLI - find neglected open GitHub issues.
//!
//! This crate provides reusable components for:
//! - Paginated GitHub REST retrieval driven by `Link` headers
//! - Staleness classification from each issue's most recent comment
//! - Label-based exclusion and the sorted report
//! - Configuration loading and persistence
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use secrecy::SecretString;
//! use stalewatch_core::{TokenProvider, load_config, stale_report};
//!
//! struct EnvToken;
//!
//! impl TokenProvider for EnvToken {
//!     fn github_token(&self) -> Option<SecretString> {
//!         std::env::var("GITHUB_TOKEN").ok().map(SecretString::from)
//!     }
//! }
//!
//! # async fn example() -> stalewatch_core::Result<()> {
//! let config = load_config()?;
//! let report = stale_report(&EnvToken, &config).await?;
//! for row in &report.rows {
//!     println!("#{} {} {}", row.number, row.age, row.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading, paths and persistence
//! - [`github`] - Repository URLs, REST client, pagination
//! - [`triage`] - Staleness classification and filtering
//! - [`report`] - Report rows and ordering

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{TokenProvider, TokenSource, resolve_token};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::StaleError;

/// Convenience Result type for stalewatch operations.
///
/// This is equivalent to `std::result::Result<T, StaleError>`.
pub type Result<T> = std::result::Result<T, StaleError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, GitHubConfig, TriageConfig, config_dir, config_file_path, load_config,
    save_exclude_labels, save_repo_url, save_token,
};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::Repository;
pub use github::client::{GitHubClient, Page, PageFetcher};
pub use github::links::PageLinks;
pub use github::pages::{fetch_all, fetch_all_as};
pub use github::types::{Comment, Issue, Label};

// ============================================================================
// Triage
// ============================================================================

pub use triage::{FilteredIssue, StalenessResult, TriageOptions, classify, filter_issues};

// ============================================================================
// Reporting
// ============================================================================

pub use report::{Age, Report, ReportRow, build_report};

// ============================================================================
// Retry Logic
// ============================================================================

pub use retry::{is_retryable, is_retryable_http, retry_backoff};

// ============================================================================
// Utilities
// ============================================================================

pub use utils::truncate;

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{run_pipeline, stale_report};

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod config;
pub mod error;
pub mod facade;
pub mod github;
pub mod report;
pub mod retry;
pub mod triage;
pub mod utils;
