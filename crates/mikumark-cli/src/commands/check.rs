//! `mikumark check` command implementation.

use std::path::PathBuf;

use clap::Args;
use mikumark_config::Config;

use super::render::report_errors;
use super::{build_renderer, read_document};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Input files (`-` reads stdin).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Treat inputs as articles with `#!title:` / `#!date:` front matter.
    #[arg(long)]
    article: bool,

    /// Path to configuration file (default: auto-discover mikumark.toml).
    #[arg(short, long, env = "MIKUMARK_CONFIG")]
    config: Option<PathBuf>,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let renderer = build_renderer(&config);

        let mut failed_files = 0;
        let mut error_count = 0;
        for input in &self.inputs {
            let doc = read_document(input)?;
            let result = if self.article {
                renderer.render_article(&doc.text).result
            } else {
                renderer.render(&doc.text)
            };
            if !result.errors.is_empty() {
                failed_files += 1;
                error_count += result.errors.len();
                report_errors(&output, input, &result.errors);
            }
        }

        if error_count > 0 {
            return Err(CliError::Check {
                files: failed_files,
                errors: error_count,
            });
        }

        output.success(&format!("{} file(s) OK", self.inputs.len()));
        Ok(())
    }
}
