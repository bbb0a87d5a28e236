//! Paragraph classification and rendering.
//!
//! A paragraph is trimmed and then classified by its leading characters; the
//! first matching kind in [`ParagraphKind`] order wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::html;
use crate::inline::parse_inline;
use crate::list::{ListKind, render_list};
use crate::renderer::TableFallback;
use crate::table::render_table;

/// `![caption](src)`; the caption is greedy so it may itself contain `](`.
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[(.+)\]\((.+?)\)$").unwrap());

/// Paragraph kinds, in classification order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParagraphKind {
    Empty,
    /// `# Title`; not `#!`, `#(` or a paragraph of only `#`.
    Heading,
    /// Three or more dashes alone.
    Rule,
    /// Lines starting with `+`.
    OrderedList,
    /// Lines starting with `-`.
    UnorderedList,
    /// Starts and ends with `|`.
    Table,
    Image,
    /// `:text`
    Centered,
    /// `$$...$$` on one line, passed through for a client-side renderer.
    Formula,
    /// `<...>`, passed through verbatim.
    Html,
    Plain,
}

pub(crate) fn classify(paragraph: &str) -> ParagraphKind {
    let bytes = paragraph.as_bytes();
    let first = bytes.first().copied();
    let second = bytes.get(1).copied();
    let last = bytes.last().copied();

    match first {
        None => ParagraphKind::Empty,
        Some(b'#')
            if !matches!(second, None | Some(b'!' | b'(' | b'\n'))
                && !paragraph.bytes().all(|b| b == b'#') =>
        {
            ParagraphKind::Heading
        }
        Some(b'-') if bytes.len() >= 3 && bytes.iter().all(|&b| b == b'-') => ParagraphKind::Rule,
        Some(b'+') if second.is_some() => ParagraphKind::OrderedList,
        Some(b'-') if second.is_some() => ParagraphKind::UnorderedList,
        Some(b'|') if bytes.len() >= 3 && last == Some(b'|') => ParagraphKind::Table,
        Some(b'!') if IMAGE.is_match(paragraph) => ParagraphKind::Image,
        Some(b':') if !matches!(second, None | Some(b'\n')) => ParagraphKind::Centered,
        Some(b'$') if is_formula(paragraph) => ParagraphKind::Formula,
        Some(b'<') if bytes.len() >= 3 && second != Some(b'\n') && last == Some(b'>') => {
            ParagraphKind::Html
        }
        _ => ParagraphKind::Plain,
    }
}

fn is_formula(paragraph: &str) -> bool {
    paragraph.len() >= 5
        && !paragraph.contains('\n')
        && paragraph.starts_with("$$")
        && paragraph.ends_with("$$")
}

/// Render one paragraph into `out`.
///
/// `line` is the paragraph's first source line.
pub(crate) fn render_paragraph(paragraph: &str, line: usize, ctx: &mut ParseContext, out: &mut String) {
    let paragraph = paragraph.trim();

    match classify(paragraph) {
        ParagraphKind::Empty => {}
        ParagraphKind::Heading => {
            let title = paragraph.trim_start_matches('#');
            let level = paragraph.len() - title.len();
            let title = title.trim();
            let index = ctx.push_heading(level, title);
            html::heading(level, index, title, out);
        }
        ParagraphKind::Rule => out.push_str("<hr/>"),
        ParagraphKind::OrderedList => render_list(paragraph, ListKind::Ordered, line, out),
        ParagraphKind::UnorderedList => render_list(paragraph, ListKind::Unordered, line, out),
        ParagraphKind::Table => match render_table(paragraph, line) {
            Ok(table) => out.push_str(&table),
            Err(err) => {
                tracing::warn!(line = err.line(), "{err}");
                if ctx.table_fallback == TableFallback::Paragraph {
                    html::paragraph(&parse_inline(paragraph), out);
                }
                ctx.push_error(err);
            }
        },
        ParagraphKind::Image => {
            if let Some(caps) = IMAGE.captures(paragraph) {
                html::image(&caps[2], &caps[1], &parse_inline(&caps[1]), out);
            }
        }
        ParagraphKind::Centered => {
            html::centered_paragraph(&parse_inline(paragraph[1..].trim()), out);
        }
        ParagraphKind::Formula => html::paragraph(paragraph, out),
        ParagraphKind::Html => out.push_str(paragraph),
        ParagraphKind::Plain => html::paragraph(&parse_inline(paragraph), out),
    }
}
