// SPDX-License-Identifier: Apache-2.0

//! Output rendering for CLI commands.
//!
//! Command handlers return data; this module handles presentation in text
//! or markdown.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::cli::{OutputContext, OutputFormat};

mod report;
mod settings;

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;

    /// Render as markdown. Defaults to text rendering.
    fn render_markdown(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        self.render_text(w, ctx)
    }
}

/// Generic render function - delegates to the trait for the selected format.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match ctx.format {
        OutputFormat::Markdown => result
            .render_markdown(&mut stdout, ctx)
            .context("Failed to render markdown")?,
        OutputFormat::Text => result
            .render_text(&mut stdout, ctx)
            .context("Failed to render text")?,
    }
    stdout.flush().context("Failed to flush output")?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_ctx(format: OutputFormat) -> OutputContext {
    OutputContext {
        format,
        quiet: false,
        is_tty: false,
    }
}
