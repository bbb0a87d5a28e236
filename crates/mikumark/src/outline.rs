//! Heading outline.

/// Prefix of the anchor id carried by every rendered heading.
pub const ANCHOR_PREFIX: &str = "Title_";

/// One heading of the document, in document order.
///
/// The position of an entry in [`RenderResult::outline`](crate::RenderResult::outline)
/// is its heading index; the rendered heading carries [`anchor_id`] of that index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlineEntry {
    /// Heading level (number of leading `#`, at least 1).
    pub level: usize,
    /// Heading text as written.
    pub title: String,
}

/// Anchor id of the heading at `index`.
///
/// ```
/// assert_eq!(mikumark::anchor_id(0), "Title_0");
/// ```
#[must_use]
pub fn anchor_id(index: usize) -> String {
    format!("{ANCHOR_PREFIX}{index}")
}
