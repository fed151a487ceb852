//! Terminal output: rich markdown through termimad, plain markdown, or JSON.

use std::fmt::Display;

use anyhow::{Context, Result};
use serde::Serialize;
use termimad::{crossterm::style::Color, MadSkin};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Rich,
    Plain,
    Json,
}

impl OutputFormat {
    /// Picks the format from the global `--json` and `--no-color` flags.
    pub fn from_flags(json: bool, no_color: bool) -> Self {
        match (json, no_color) {
            (true, _) => OutputFormat::Json,
            (false, true) => OutputFormat::Plain,
            (false, false) => OutputFormat::Rich,
        }
    }
}

pub struct TerminalRenderer {
    format: OutputFormat,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(format: OutputFormat) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { format, skin }
    }

    /// Prints a result: its markdown view, or `data` as JSON in JSON mode.
    pub fn show<V, D>(&self, view: &V, data: &D) -> Result<()>
    where
        V: Display + ?Sized,
        D: Serialize + ?Sized,
    {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)
                    .context("Failed to serialize result as JSON")?;
                println!("{json}");
            }
            OutputFormat::Rich | OutputFormat::Plain => self.render(&view.to_string()),
        }
        Ok(())
    }

    fn render(&self, markdown: &str) {
        if self.format != OutputFormat::Rich {
            print!("{markdown}");
            return;
        }

        // termimad drops the leading hashes of headers; keep them visible
        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[34m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }
}
