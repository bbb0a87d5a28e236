//! `mikumark outline` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use mikumark::{OutlineEntry, anchor_id};
use mikumark_config::Config;

use super::{build_renderer, read_document};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    /// Input file (`-` reads stdin).
    input: PathBuf,

    /// Print JSON instead of an indented list.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover mikumark.toml).
    #[arg(short, long, env = "MIKUMARK_CONFIG")]
    config: Option<PathBuf>,
}

impl OutlineArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let doc = read_document(&self.input)?;
        let result = build_renderer(&config).render(&doc.text);

        if self.json {
            output.emit(&serde_json::to_string_pretty(&result.outline)?)?;
        } else if result.outline.is_empty() {
            output.info("No headings");
        } else {
            let text = format_outline(&result.outline, |anchor| output.dim(anchor));
            output.emit(text.trim_end())?;
        }

        Ok(())
    }
}

/// Format the outline as an indented list, one heading per line.
///
/// Indentation is relative to the shallowest heading in the document.
fn format_outline(outline: &[OutlineEntry], style_anchor: impl Fn(&str) -> String) -> String {
    let base = outline.iter().map(|e| e.level).min().unwrap_or(1);
    let mut text = String::new();
    for (index, entry) in outline.iter().enumerate() {
        let indent = "  ".repeat(entry.level - base);
        let anchor = style_anchor(&format!("#{}", anchor_id(index)));
        writeln!(text, "{indent}- {} {anchor}", entry.title).unwrap();
    }
    text
}
