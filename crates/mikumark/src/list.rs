//! Nested lists.
//!
//! Every line of a list paragraph is one item; the length of its marker run
//! (`+`, `++`, ... for ordered, `-`, `--`, ... for unordered) is its depth.

use crate::inline::parse_inline;
use crate::nesting::{Container, NestingStack};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn marker(self) -> char {
        match self {
            Self::Ordered => '+',
            Self::Unordered => '-',
        }
    }

    fn container(self) -> Container {
        match self {
            Self::Ordered => Container::OrderedList,
            Self::Unordered => Container::UnorderedList,
        }
    }
}

/// Render a list paragraph.
///
/// A line without a marker (or with a marker and nothing after it) makes the
/// whole paragraph malformed; it is then written out as raw text.
pub(crate) fn render_list(paragraph: &str, kind: ListKind, line: usize, out: &mut String) {
    if let Some(html) = render_items(paragraph, kind) {
        out.push_str(&html);
    } else {
        tracing::warn!(line, "Malformed list, emitting raw text");
        out.push_str(paragraph);
    }
}

fn render_items(paragraph: &str, kind: ListKind) -> Option<String> {
    let mut html = String::with_capacity(paragraph.len() * 2);
    let mut stack = NestingStack::new();

    for line in paragraph.lines() {
        let (depth, item) = split_marker(line, kind.marker())?;
        let sibling = depth <= stack.depth();
        stack.adjust_to(depth, kind.container(), &mut html);
        if sibling {
            html.push_str("</li><li>");
        }
        html.push_str(&parse_inline(item));
    }
    stack.close_all(&mut html);

    Some(html)
}

/// Split a list line into its depth and trimmed item text.
fn split_marker(line: &str, marker: char) -> Option<(usize, &str)> {
    let line = line.trim_start();
    let rest = line.trim_start_matches(marker);
    let depth = line.len() - rest.len();
    if depth == 0 || rest.is_empty() {
        return None;
    }
    Some((depth, rest.trim()))
}
