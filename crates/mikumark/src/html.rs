//! HTML output helpers.
//!
//! Element writers shared by the paragraph dispatcher and the structural
//! parser, plus the HTML special-character codec.

use std::borrow::Cow;
use std::fmt::Write;

use crate::outline::anchor_id;

/// Escape HTML special characters.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
///
/// # Example
///
/// ```
/// use mikumark::escape_html;
///
/// assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape_html`] exactly once.
///
/// Entities are decoded in a single left-to-right scan, so `&amp;lt;` becomes
/// `&lt;` and not `<`.
#[must_use]
pub fn unescape_html(s: &str) -> Cow<'_, str> {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
    ];

    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some((entity, c)) = ENTITIES.iter().find(|(e, _)| tail.starts_with(e)) {
            out.push(*c);
            rest = &tail[entity.len()..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Write a heading anchored at its outline index.
///
/// Levels beyond 6 are rendered as `<h6>`.
pub(crate) fn heading(level: usize, index: usize, title: &str, out: &mut String) {
    let tag = level.clamp(1, 6);
    write!(
        out,
        r#"<h{tag} id="{}">{title}</h{tag}>"#,
        anchor_id(index)
    )
    .unwrap();
}

/// Write a fenced code block from its HTML-protected payload.
pub(crate) fn code_block(language: Option<&str>, protected: &str, out: &mut String) {
    if let Some(language) = language {
        write!(
            out,
            r#"<pre><code class="language-{}">{protected}</code></pre>"#,
            escape_html(language)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{protected}</code></pre>").unwrap();
    }
}

/// Write an image with a caption. `caption_html` is already rendered.
pub(crate) fn image(src: &str, alt: &str, caption_html: &str, out: &mut String) {
    write!(
        out,
        r#"<div class="MikumarkImageContainer"><img class="MikumarkImage" src="{}" alt="{}"><div class="MikumarkImageTitle">{caption_html}</div></div>"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}

/// Write a paragraph around already-rendered content.
pub(crate) fn paragraph(content: &str, out: &mut String) {
    out.push_str("<p>");
    out.push_str(content);
    out.push_str("</p>");
}

/// Write a center-aligned paragraph around already-rendered content.
pub(crate) fn centered_paragraph(content: &str, out: &mut String) {
    out.push_str(r#"<p style="text-align:center;">"#);
    out.push_str(content);
    out.push_str("</p>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_borrows_clean_input() {
        assert!(matches!(escape_html("clean text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let original = r#"if a < b && c > "d" { 'e' }"#;
        assert_eq!(unescape_html(&escape_html(original)), original);
    }

    #[test]
    fn test_unescape_only_once() {
        let once = escape_html("&lt;");
        assert_eq!(once, "&amp;lt;");
        assert_eq!(unescape_html(&once), "&lt;");

        let twice = escape_html(&escape_html("<x>")).into_owned();
        let back = unescape_html(&twice).into_owned();
        assert_eq!(back, "&lt;x&gt;");
        assert_eq!(unescape_html(&back), "<x>");
    }

    #[test]
    fn test_unescape_keeps_unknown_entities() {
        assert_eq!(unescape_html("&nbsp; & &amp"), "&nbsp; & &amp");
    }

    #[test]
    fn test_heading_clamps_level() {
        let mut out = String::new();
        heading(8, 3, "Deep", &mut out);
        assert_eq!(out, r#"<h6 id="Title_3">Deep</h6>"#);
    }

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        code_block(Some("rust"), "if a &lt; b {}\n", &mut out);
        assert_eq!(
            out,
            "<pre><code class=\"language-rust\">if a &lt; b {}\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        code_block(None, "x &amp; y", &mut out);
        assert_eq!(out, "<pre><code>x &amp; y</code></pre>");
    }

    #[test]
    fn test_image() {
        let mut out = String::new();
        image("a.png?x=1&y=2", "Cat", "<b>Cat</b>", &mut out);
        assert_eq!(
            out,
            r#"<div class="MikumarkImageContainer"><img class="MikumarkImage" src="a.png?x=1&amp;y=2" alt="Cat"><div class="MikumarkImageTitle"><b>Cat</b></div></div>"#
        );
    }
}
