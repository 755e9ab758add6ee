// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};
use console::style;
use stalewatch_core::report::Report;
use stalewatch_core::utils::truncate;

use super::Renderable;
use crate::cli::OutputContext;

/// Display width of the title column.
const TITLE_WIDTH: usize = 60;

const HEADERS: [&str; 4] = ["Issue", "Comments", "Age (days)", "Title"];

fn count_line(count: usize) -> String {
    if count == 1 {
        "1 issue".to_string()
    } else {
        format!("{count} issues")
    }
}

impl Renderable for Report {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{}", style(self.issues_url.as_str()).dim())?;

        if !self.is_empty() {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED).set_header(HEADERS);

            for row in &self.rows {
                table.add_row(vec![
                    Cell::new(format!("#{}", row.number)).set_alignment(CellAlignment::Right),
                    Cell::new(row.comment_count).set_alignment(CellAlignment::Right),
                    Cell::new(row.age).set_alignment(CellAlignment::Right),
                    Cell::new(truncate(&row.title, TITLE_WIDTH)),
                ]);
            }
            writeln!(w, "{table}")?;
        }

        writeln!(w, "{}", style(count_line(self.count())).bold())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## Stale issues\n")?;
        writeln!(w, "`{}`\n", self.issues_url)?;

        if !self.is_empty() {
            writeln!(w, "| {} |", HEADERS.join(" | "))?;
            writeln!(w, "| ---: | ---: | ---: | --- |")?;
            for row in &self.rows {
                let title = truncate(&row.title, TITLE_WIDTH).replace('|', "\\|");
                writeln!(
                    w,
                    "| #{} | {} | {} | {title} |",
                    row.number, row.comment_count, row.age
                )?;
            }
            writeln!(w)?;
        }

        writeln!(w, "**{}**", count_line(self.count()))
    }
}
