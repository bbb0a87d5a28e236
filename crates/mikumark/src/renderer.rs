//! Document renderer.

use std::borrow::Cow;

use crate::article::{Article, split_front_matter};
use crate::code_block::extract_code_blocks;
use crate::context::ParseContext;
use crate::error::ParseError;
use crate::outline::OutlineEntry;
use crate::structure::{reinject, render_blocks, split_blocks};
use crate::tabs::TabsPreprocessor;

/// Result of rendering a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderResult {
    /// HTML fragment, without any enclosing document shell.
    pub html: String,
    /// Headings in document order. Entry `n` is the heading anchored at
    /// [`anchor_id(n)`](crate::anchor_id).
    pub outline: Vec<OutlineEntry>,
    /// Recoverable errors. Each one affected a single construct only.
    pub errors: Vec<ParseError>,
}

/// What to emit for a table that fails to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TableFallback {
    /// Render the table source as a plain paragraph.
    #[default]
    Paragraph,
    /// Emit nothing for the table.
    Omit,
}

/// Mikumark to HTML renderer.
///
/// A renderer holds only options; every [`render`](Self::render) call uses
/// fresh state, so one renderer can be shared freely across threads.
///
/// # Example
///
/// ```
/// use mikumark::{Renderer, TableFallback};
///
/// let renderer = Renderer::new().with_table_fallback(TableFallback::Omit);
/// let result = renderer.render("# Intro\n\n|broken|");
///
/// assert_eq!(result.html, r#"<h1 id="Title_0">Intro</h1>"#);
/// assert_eq!(result.outline[0].title, "Intro");
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Renderer {
    table_fallback: TableFallback,
    language_class: bool,
}

impl Renderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table_fallback: TableFallback::default(),
            language_class: true,
        }
    }

    /// Set what to emit for a table that fails to parse.
    #[must_use]
    pub fn with_table_fallback(mut self, fallback: TableFallback) -> Self {
        self.table_fallback = fallback;
        self
    }

    /// Enable or disable `class="language-<tag>"` on fenced code blocks.
    ///
    /// Enabled by default.
    #[must_use]
    pub fn with_language_class(mut self, enabled: bool) -> Self {
        self.language_class = enabled;
        self
    }

    /// Render a document.
    #[must_use]
    pub fn render(&self, markup: &str) -> RenderResult {
        let markup = normalize_line_endings(markup);
        let mut ctx = ParseContext::new(self.table_fallback);

        let lines = TabsPreprocessor::new().process(&markup, &mut ctx);
        let lines = extract_code_blocks(lines, &mut ctx);
        let blocks = split_blocks(lines);
        tracing::debug!(
            blocks = blocks.len(),
            code_blocks = ctx.code_blocks().len(),
            "Split document into blocks"
        );

        let fragments = render_blocks(blocks, &mut ctx);
        let html = reinject(fragments, ctx.code_blocks(), self.language_class);
        let result = ctx.into_result(html);
        tracing::debug!(
            headings = result.outline.len(),
            errors = result.errors.len(),
            "Rendered document"
        );

        result
    }

    /// Render an article: front matter lines are split off before rendering.
    #[must_use]
    pub fn render_article(&self, text: &str) -> Article {
        let (front_matter, content) = split_front_matter(text);
        Article {
            title: front_matter.title,
            date: front_matter.date,
            result: self.render(&content),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a document with default options.
///
/// ```
/// let result = mikumark::parse_markdown("Hello **world**");
/// assert_eq!(result.html, "<p>Hello <b>world</b></p>");
/// ```
#[must_use]
pub fn parse_markdown(markup: &str) -> RenderResult {
    Renderer::new().render(markup)
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_input() {
        let result = parse_markdown("# A\r\n\r\ntext\r\nmore");
        assert_eq!(result.html, r#"<h1 id="Title_0">A</h1><p>text<br/>more</p>"#);
    }

    #[test]
    fn test_language_class_toggle() {
        let input = "```rust\nfn main() {}\n```";
        assert_eq!(
            Renderer::new().render(input).html,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
        assert_eq!(
            Renderer::new().with_language_class(false).render(input).html,
            "<pre><code>fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_renders_are_independent() {
        let renderer = Renderer::new();
        let input = "# A\n\n@@tab\n@x\n1\n@@tab";
        let first = renderer.render(input);
        let second = renderer.render(input);

        assert_eq!(first, second);
        assert!(second.html.contains(r#"id="Title_0""#));
        assert!(second.html.contains("MikumarkTab_0_0"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse_markdown(""), RenderResult::default());
        assert_eq!(parse_markdown("\n\n  \n"), RenderResult::default());
    }
}
