//! Cross-paragraph structure.
//!
//! The document flows through here as typed [`Line`]s: plain text, markup
//! emitted by the tab pass, or a reference to an extracted code block. Text
//! lines are grouped into paragraphs on blank lines, blockquote nesting is
//! tracked across paragraphs, and code blocks are written back last.

use crate::code_block::CodeBlock;
use crate::context::ParseContext;
use crate::html;
use crate::nesting::{Container, NestingStack};
use crate::paragraph::render_paragraph;

/// One source line after the tab and code passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Line {
    /// 1-indexed source line number.
    pub(crate) number: usize,
    pub(crate) kind: LineKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// Author text, still subject to every paragraph and inline rule.
    Text(String),
    /// Finished HTML that must pass through untouched.
    Markup(String),
    /// Stand-in for an extracted fenced code block.
    Code { quote_level: usize, index: usize },
}

impl Line {
    pub(crate) fn text(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            kind: LineKind::Text(text.into()),
        }
    }

    pub(crate) fn markup(number: usize, html: impl Into<String>) -> Self {
        Self {
            number,
            kind: LineKind::Markup(html.into()),
        }
    }
}

/// A unit of the structural pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Block {
    Paragraph { line: usize, text: String },
    Markup(String),
    Code { quote_level: usize, index: usize },
}

/// Output pieces; code is kept as a reference until [`reinject`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Fragment {
    Html(String),
    Code(usize),
}

/// Group lines into blocks.
///
/// Blank (or whitespace-only) lines end a paragraph. Markup and code lines
/// always stand alone.
pub(crate) fn split_blocks(lines: Vec<Line>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for Line { number, kind } in lines {
        match kind {
            LineKind::Text(text) if text.trim().is_empty() => {
                flush_paragraph(&mut current, &mut blocks);
            }
            LineKind::Text(text) => match current.as_mut() {
                Some((_, paragraph)) => {
                    paragraph.push('\n');
                    paragraph.push_str(&text);
                }
                None => current = Some((number, text)),
            },
            LineKind::Markup(html) => {
                flush_paragraph(&mut current, &mut blocks);
                blocks.push(Block::Markup(html));
            }
            LineKind::Code { quote_level, index } => {
                flush_paragraph(&mut current, &mut blocks);
                blocks.push(Block::Code { quote_level, index });
            }
        }
    }
    flush_paragraph(&mut current, &mut blocks);

    blocks
}

fn flush_paragraph(current: &mut Option<(usize, String)>, blocks: &mut Vec<Block>) {
    if let Some((line, text)) = current.take() {
        blocks.push(Block::Paragraph { line, text });
    }
}

#[derive(Default)]
struct HtmlBuffer {
    fragments: Vec<Fragment>,
    current: String,
}

impl HtmlBuffer {
    fn html(&mut self) -> &mut String {
        &mut self.current
    }

    fn push_code(&mut self, index: usize) {
        if !self.current.is_empty() {
            self.fragments
                .push(Fragment::Html(std::mem::take(&mut self.current)));
        }
        self.fragments.push(Fragment::Code(index));
    }

    fn finish(mut self) -> Vec<Fragment> {
        if !self.current.is_empty() {
            self.fragments.push(Fragment::Html(self.current));
        }
        self.fragments
    }
}

/// Render blocks in order, opening and closing blockquotes between them.
pub(crate) fn render_blocks(blocks: Vec<Block>, ctx: &mut ParseContext) -> Vec<Fragment> {
    let mut buf = HtmlBuffer::default();
    let mut quotes = NestingStack::new();

    for block in blocks {
        match block {
            Block::Paragraph { line, text } => {
                if let Some(level) = quote_level(&text) {
                    quotes.adjust_to(level, Container::Blockquote, buf.html());
                    render_paragraph(&strip_quotes(&text, level), line, ctx, buf.html());
                } else {
                    quotes.close_all(buf.html());
                    render_paragraph(&text, line, ctx, buf.html());
                }
            }
            Block::Markup(markup) => {
                quotes.close_all(buf.html());
                buf.html().push_str(&markup);
            }
            Block::Code { quote_level, index } => {
                quotes.adjust_to(quote_level, Container::Blockquote, buf.html());
                buf.push_code(index);
            }
        }
    }
    quotes.close_all(buf.html());

    buf.finish()
}

/// Quote depth of a paragraph, or `None` if it is not quoted.
///
/// A quoted paragraph starts with `>` followed by something on the same line.
fn quote_level(paragraph: &str) -> Option<usize> {
    let mut chars = paragraph.chars();
    if chars.next()? != '>' || matches!(chars.next(), None | Some('\n')) {
        return None;
    }
    Some(paragraph.len() - paragraph.trim_start_matches('>').len())
}

/// Remove up to `level` leading `>` from every line.
fn strip_quotes(paragraph: &str, level: usize) -> String {
    paragraph
        .split('\n')
        .map(|line| {
            let mut rest = line;
            for _ in 0..level {
                match rest.strip_prefix('>') {
                    Some(stripped) => rest = stripped,
                    None => break,
                }
            }
            rest.trim_start()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write code blocks back into the rendered output.
pub(crate) fn reinject(
    fragments: Vec<Fragment>,
    code_blocks: &[CodeBlock],
    language_class: bool,
) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Html(markup) => out.push_str(&markup),
            Fragment::Code(index) => {
                if let Some(block) = code_blocks.get(index) {
                    let language = (language_class && !block.language.is_empty())
                        .then_some(block.language.as_str());
                    html::code_block(language, &block.code, &mut out);
                }
            }
        }
    }
    out
}
