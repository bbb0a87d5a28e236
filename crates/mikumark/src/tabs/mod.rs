//! Tabbed content groups.
//!
//! A tab block is delimited by `@@tab` lines. Inside it, every line starting
//! with `@` opens a new tab titled by the rest of the line:
//!
//! ```text
//! @@tab
//! @macOS
//! Install with Homebrew.
//! @Linux
//! Install with apt.
//! @@tab
//! ```
//!
//! # Architecture
//!
//! [`TabsPreprocessor`] runs first over the raw document. It collects each
//! tab's lines and, when the block closes, emits the button row and pane
//! wrappers as [`LineKind::Markup`](crate::structure::LineKind::Markup) lines
//! (see [`markup`]). Tab content stays in the line stream as ordinary text, so
//! later passes parse it exactly like the rest of the document.
//!
//! Group ids count groups; tab ids count tabs across the whole document, so
//! every button and pane class is unique.

mod markup;
mod preprocessor;

pub(crate) use preprocessor::TabsPreprocessor;
