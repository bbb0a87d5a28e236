//! `mikumark render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mikumark::{OutlineEntry, ParseError};
use mikumark_config::{CliSettings, Config};

use super::{build_renderer, read_document};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input files (`-` reads stdin).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (overrides config). Without one, HTML goes to stdout.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write `<name>.outline.json` next to the HTML (overrides config).
    #[arg(long)]
    outline: bool,

    /// Do not write outline JSON.
    #[arg(long, conflicts_with = "outline")]
    no_outline: bool,

    /// Treat inputs as articles with `#!title:` / `#!date:` front matter.
    #[arg(long)]
    article: bool,

    /// Path to configuration file (default: auto-discover mikumark.toml).
    #[arg(short, long, env = "MIKUMARK_CONFIG")]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            outline: match (self.outline, self.no_outline) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let renderer = build_renderer(&config);

        if let Some(dir) = &config.output_resolved.dir {
            std::fs::create_dir_all(dir)?;
        }

        for input in &self.inputs {
            let doc = read_document(input)?;
            tracing::info!(input = %input.display(), "Rendering");

            let result = if self.article {
                let article = renderer.render_article(&doc.text);
                if let Some(title) = &article.title {
                    output.info(&format!("{}: {title}", input.display()));
                }
                article.result
            } else {
                renderer.render(&doc.text)
            };

            report_errors(&output, input, &result.errors);

            match &config.output_resolved.dir {
                Some(dir) => {
                    let outline = config
                        .output_resolved
                        .outline
                        .then_some(result.outline.as_slice());
                    let html_path = write_outputs(dir, &doc.name, &result.html, outline)?;
                    output.success(&format!("Wrote {}", html_path.display()));
                }
                None => output.emit(&result.html)?,
            }
        }

        Ok(())
    }
}

/// Print each parse error as a warning prefixed with its input.
pub(crate) fn report_errors(output: &Output, input: &Path, errors: &[ParseError]) {
    for err in errors {
        output.warning(&format!("{}: {err}", input.display()));
    }
}

/// Write `<name>.html` and optionally `<name>.outline.json` into `dir`.
///
/// Returns the HTML file path.
fn write_outputs(
    dir: &Path,
    name: &str,
    html: &str,
    outline: Option<&[OutlineEntry]>,
) -> Result<PathBuf, CliError> {
    let html_path = dir.join(format!("{name}.html"));
    std::fs::write(&html_path, html)?;

    if let Some(outline) = outline {
        let json = serde_json::to_string_pretty(outline)?;
        std::fs::write(dir.join(format!("{name}.outline.json")), json)?;
    }

    Ok(html_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_outputs_with_outline() {
        let dir = tempfile::tempdir().unwrap();
        let outline = vec![OutlineEntry {
            level: 2,
            title: "Intro".to_owned(),
        }];

        let html_path = write_outputs(dir.path(), "doc", "<p>x</p>", Some(&outline)).unwrap();

        assert_eq!(html_path, dir.path().join("doc.html"));
        assert_eq!(std::fs::read_to_string(&html_path).unwrap(), "<p>x</p>");

        let json = std::fs::read_to_string(dir.path().join("doc.outline.json")).unwrap();
        let parsed: Vec<OutlineEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, outline);
    }

    #[test]
    fn test_write_outputs_without_outline() {
        let dir = tempfile::tempdir().unwrap();
        write_outputs(dir.path(), "doc", "<p>x</p>", None).unwrap();

        assert!(dir.path().join("doc.html").exists());
        assert!(!dir.path().join("doc.outline.json").exists());
    }
}
