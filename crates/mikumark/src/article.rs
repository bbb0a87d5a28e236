//! Articles with front matter.
//!
//! ```text
//! #!title: Release notes
//! #!date: 2024-05-01
//! #!content
//! # What changed
//! ```
//!
//! `#!title:` and `#!date:` lines set metadata, a `#!content` line is a
//! separator; all three are blanked before rendering so line numbers in
//! [`ParseError`](crate::ParseError)s still match the source. If a key
//! repeats, the last value wins.

use crate::renderer::{RenderResult, Renderer};

/// A rendered article.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Article {
    pub title: Option<String>,
    pub date: Option<String>,
    pub result: RenderResult,
}

/// Metadata lines split off an article.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
}

/// Separate front matter from article content.
///
/// Front matter lines are replaced by empty lines in the returned content.
#[must_use]
pub fn split_front_matter(text: &str) -> (FrontMatter, String) {
    let mut front_matter = FrontMatter::default();
    let mut content = Vec::new();

    for line in text.lines() {
        if let Some(title) = line.strip_prefix("#!title:") {
            front_matter.title = Some(title.trim().to_owned());
            content.push("");
        } else if let Some(date) = line.strip_prefix("#!date:") {
            front_matter.date = Some(date.trim().to_owned());
            content.push("");
        } else if line.trim_end() == "#!content" {
            content.push("");
        } else {
            content.push(line);
        }
    }

    (front_matter, content.join("\n"))
}

/// Render an article with default options.
///
/// ```
/// let article = mikumark::parse_article("#!title: Hi\n#!content\nBody");
/// assert_eq!(article.title.as_deref(), Some("Hi"));
/// assert_eq!(article.date, None);
/// assert_eq!(article.result.html, "<p>Body</p>");
/// ```
#[must_use]
pub fn parse_article(text: &str) -> Article {
    Renderer::new().render_article(text)
}
