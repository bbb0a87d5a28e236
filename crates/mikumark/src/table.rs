//! Tables.
//!
//! ```text
//! |Name|Size|
//! |:---|---:|
//! |a.txt|12|
//! ```
//!
//! Rows above the separator row are header rows, rows below it are body
//! rows aligned per column by the separator's colons.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::inline::parse_inline;

static SEPARATOR_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-{3,}:?$").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_separator(cell: &str) -> Option<Self> {
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Some(Self::Center),
            (true, false) => Some(Self::Left),
            (false, true) => Some(Self::Right),
            (false, false) => None,
        }
    }

    fn style(self) -> &'static str {
        match self {
            Self::Left => r#" style="text-align:left;""#,
            Self::Center => r#" style="text-align:center;""#,
            Self::Right => r#" style="text-align:right;""#,
        }
    }
}

/// Render a table paragraph.
///
/// `first_line` is the source line of the first row and is only used for
/// error reporting.
///
/// # Errors
///
/// Returns [`ParseError::MalformedTableRow`] for the first row that is not
/// enclosed in `|` or has fewer than two cells.
pub(crate) fn render_table(paragraph: &str, first_line: usize) -> Result<String, ParseError> {
    let mut html = String::from(r#"<div class="MikumarkTableContainer"><table>"#);
    let mut alignments: Vec<Option<Alignment>> = Vec::new();
    let mut in_body = false;

    for (offset, row) in paragraph.lines().enumerate() {
        let cells = split_row(row).ok_or_else(|| ParseError::MalformedTableRow {
            line: first_line + offset,
            row: row.trim().to_owned(),
        })?;

        if is_separator(&cells) {
            alignments = cells
                .iter()
                .map(|cell| Alignment::from_separator(cell.trim()))
                .collect();
            in_body = true;
            continue;
        }

        let tag = if in_body { "td" } else { "th" };
        html.push_str("<tr>");
        for (col, cell) in cells.iter().enumerate() {
            let style = alignments
                .get(col)
                .copied()
                .flatten()
                .map_or("", Alignment::style);
            write!(html, "<{tag}{style}>{}</{tag}>", parse_inline(cell.trim())).unwrap();
        }
        html.push_str("</tr>");
    }

    html.push_str("</table></div>");
    Ok(html)
}

/// Split a row into cells on unescaped `|`.
///
/// Returns `None` unless the row starts and ends with `|` and holds at least
/// two cells.
fn split_row(row: &str) -> Option<Vec<&str>> {
    let inner = row.trim().strip_prefix('|')?.strip_suffix('|')?;

    let mut cells = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (idx, c) in inner.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '|' => {
                cells.push(&inner[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    cells.push(&inner[start..]);

    (cells.len() >= 2).then_some(cells)
}

fn is_separator(cells: &[&str]) -> bool {
    cells.iter().all(|cell| SEPARATOR_CELL.is_match(cell.trim()))
}
