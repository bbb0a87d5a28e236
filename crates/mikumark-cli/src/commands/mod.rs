//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod outline;
pub(crate) mod render;

use std::io::Read;
use std::path::Path;

use mikumark::{Renderer, TableFallback};
use mikumark_config::{Config, TableErrorMode};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use outline::OutlineArgs;
pub(crate) use render::RenderArgs;

/// A loaded input document.
#[derive(Debug)]
pub(crate) struct Document {
    /// Output base name: the file stem, or `stdin`.
    pub(crate) name: String,
    pub(crate) text: String,
}

/// Read a document from a file, or from stdin when `path` is `-`.
pub(crate) fn read_document(path: &Path) -> Result<Document, CliError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(Document {
            name: "stdin".to_owned(),
            text,
        });
    }

    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map_or_else(|| "document".to_owned(), |s| s.to_string_lossy().into_owned());
    Ok(Document { name, text })
}

/// Build a renderer from the `[render]` section.
pub(crate) fn build_renderer(config: &Config) -> Renderer {
    let fallback = match config.render.on_table_error {
        TableErrorMode::Paragraph => TableFallback::Paragraph,
        TableErrorMode::Omit => TableFallback::Omit,
    };
    Renderer::new()
        .with_table_fallback(fallback)
        .with_language_class(config.render.language_class)
}
