// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use console::style;

use super::Renderable;
use crate::cli::OutputContext;
use crate::commands::settings::SettingSaved;

impl Renderable for SettingSaved {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if ctx.quiet {
            return Ok(());
        }
        writeln!(
            w,
            "{} {} saved to {}",
            style("✓").green(),
            self.description,
            style(self.path.display()).dim()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::test_ctx;

    #[test]
    fn test_confirmation_names_file() {
        let saved = SettingSaved {
            description: "GitHub token".to_string(),
            path: PathBuf::from("/tmp/stalewatch/config.toml"),
        };
        console::set_colors_enabled(false);
        let mut out = Vec::new();
        saved
            .render_text(&mut out, &test_ctx(OutputFormat::Text))
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("GitHub token saved to /tmp/stalewatch/config.toml"));
    }

    #[test]
    fn test_quiet_prints_nothing() {
        let saved = SettingSaved {
            description: "GitHub token".to_string(),
            path: PathBuf::from("/tmp/config.toml"),
        };
        let mut ctx = test_ctx(OutputFormat::Text);
        ctx.quiet = true;
        let mut out = Vec::new();
        saved.render_text(&mut out, &ctx).unwrap();
        assert!(out.is_empty());
    }
}
