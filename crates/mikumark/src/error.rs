//! Recoverable parse errors.

/// A construct that could not be parsed.
///
/// Errors are scoped to the offending construct: the rest of the document is
/// rendered normally and the errors are collected in
/// [`RenderResult::errors`](crate::RenderResult::errors).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    /// A table row without enclosing bars or with fewer than two cells.
    #[error("line {line}: malformed table row `{row}` (expected `|cell|cell|`)")]
    MalformedTableRow {
        /// Source line of the row (1-indexed).
        line: usize,
        /// The row as written.
        row: String,
    },
}

impl ParseError {
    /// Source line the error refers to (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedTableRow { line, .. } => *line,
        }
    }
}
