// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the stalewatch CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging to stderr,
//! so logs never mix with the report on stdout. The `RUST_LOG` environment
//! variable takes precedence over the defaults below.
//!
//! # Examples
//!
//! ```bash
//! # Per-request debug output
//! stalewatch --verbose
//!
//! # Trace everything from stalewatch and its HTTP stack
//! RUST_LOG=stalewatch=trace,reqwest=debug stalewatch
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
///
/// Without `RUST_LOG`, only warnings are shown (retries, pagination cycles).
/// `verbose` raises stalewatch's own events to debug level.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        "stalewatch=debug,reqwest=error"
    } else {
        "stalewatch=warn,reqwest=error"
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
