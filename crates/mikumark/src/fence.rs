//! Code fence detection.
//!
//! A fence line is an optional run of `>` (a fence inside a blockquote),
//! optional whitespace, then three backticks and an optional language tag:
//!
//! ````text
//! ```rust
//! >> ```:python
//! ````
//!
//! Any fence line closes an open fence.

/// A parsed fence line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Fence {
    /// Number of leading `>` characters.
    pub(crate) quote_level: usize,
    /// Lower-cased language tag, empty when absent.
    pub(crate) language: String,
}

/// Parse a fence line.
pub(crate) fn parse_fence(line: &str) -> Option<Fence> {
    let unquoted = line.trim_start_matches('>');
    let quote_level = line.len() - unquoted.len();
    let rest = unquoted.trim_start().strip_prefix("```")?;
    let language = rest.strip_prefix(':').unwrap_or(rest).trim().to_lowercase();

    Some(Fence {
        quote_level,
        language,
    })
}

/// Tracks whether a line-by-line scan is inside a fenced code block.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: bool,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open
    }

    /// Update fence state based on a line.
    ///
    /// Returns `true` if the line is a fence marker (opening or closing).
    pub(crate) fn update(&mut self, line: &str) -> bool {
        if parse_fence(line).is_some() {
            self.open = !self.open;
            true
        } else {
            false
        }
    }
}
