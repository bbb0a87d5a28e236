//! Fenced code block extraction.
//!
//! Runs before paragraph splitting. Every fenced block is lifted out of the
//! line stream into the [`ParseContext`] and replaced by a single
//! [`LineKind::Code`] line, so blank lines inside code never split a
//! paragraph and no inline or paragraph rule ever sees code text.

use std::borrow::Cow;

use crate::context::ParseContext;
use crate::fence::parse_fence;
use crate::html::{escape_html, unescape_html};
use crate::structure::{Line, LineKind};

/// A fenced code block lifted out of the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Lower-cased language tag, empty when the fence has none.
    pub language: String,
    /// HTML-protected code text, one `\n` after every source line.
    pub code: String,
}

impl CodeBlock {
    /// Create a block from raw source text.
    #[must_use]
    pub fn new(language: impl Into<String>, source: &str) -> Self {
        Self {
            language: language.into(),
            code: escape_html(source).into_owned(),
        }
    }

    /// The code exactly as written between the fences.
    #[must_use]
    pub fn source(&self) -> Cow<'_, str> {
        unescape_html(&self.code)
    }
}

struct OpenFence {
    line: usize,
    quote_level: usize,
    language: String,
    source: String,
}

/// Replace fenced code regions with [`LineKind::Code`] lines.
pub(crate) fn extract_code_blocks(lines: Vec<Line>, ctx: &mut ParseContext) -> Vec<Line> {
    let mut out = Vec::with_capacity(lines.len());
    let mut open: Option<OpenFence> = None;

    for Line { number, kind } in lines {
        match kind {
            LineKind::Text(text) => {
                if let Some(fence) = parse_fence(&text) {
                    match open.take() {
                        Some(block) => out.push(close_fence(block, ctx)),
                        None => {
                            open = Some(OpenFence {
                                line: number,
                                quote_level: fence.quote_level,
                                language: fence.language,
                                source: String::new(),
                            });
                        }
                    }
                } else if let Some(block) = open.as_mut() {
                    block
                        .source
                        .push_str(strip_quote_prefix(&text, block.quote_level));
                    block.source.push('\n');
                } else {
                    out.push(Line::text(number, text));
                }
            }
            LineKind::Markup(html) => {
                // Tab markup only reaches an open fence when the fence was left
                // unterminated inside a pane; the pane must still close.
                if let Some(block) = open.take() {
                    tracing::warn!(
                        line = block.line,
                        "Unterminated code fence, closing at end of tab"
                    );
                    out.push(close_fence(block, ctx));
                }
                out.push(Line::markup(number, html));
            }
            kind => out.push(Line { number, kind }),
        }
    }

    if let Some(block) = open {
        tracing::warn!(
            line = block.line,
            "Unterminated code fence, closing at end of document"
        );
        out.push(close_fence(block, ctx));
    }

    out
}

fn close_fence(block: OpenFence, ctx: &mut ParseContext) -> Line {
    let index = ctx.push_code_block(CodeBlock::new(block.language, &block.source));
    Line {
        number: block.line,
        kind: LineKind::Code {
            quote_level: block.quote_level,
            index,
        },
    }
}

/// Strip up to `level` leading `>` and one following space.
fn strip_quote_prefix(line: &str, level: usize) -> &str {
    if level == 0 {
        return line;
    }
    let mut rest = line;
    for _ in 0..level {
        match rest.strip_prefix('>') {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }
    rest.strip_prefix(' ').unwrap_or(rest)
}
