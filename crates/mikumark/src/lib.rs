//! Mikumark to HTML converter.
//!
//! Mikumark is a small markup language for articles. Rendering a document
//! produces an HTML fragment plus an outline of its headings, ready to be
//! turned into a table of contents.
//!
//! # Pipeline
//!
//! 1. **Tabs** (`tabs`): `@@tab` blocks are expanded into tab markup; their
//!    content stays in the document as ordinary text.
//! 2. **Code** (`code_block`): fenced code blocks are lifted out so nothing
//!    else touches them.
//! 3. **Structure** (`structure`): lines are grouped into paragraphs and
//!    blockquote nesting is tracked across paragraphs.
//! 4. **Paragraphs** (`paragraph`): each paragraph is classified (heading,
//!    list, table, ...) and rendered, using [`parse_inline`] for span markup.
//! 5. Code blocks are written back in place.
//!
//! Every call works on its own state; rendering is safe to run concurrently
//! on independent documents.
//!
//! # Example
//!
//! ```
//! use mikumark::parse_markdown;
//!
//! let result = parse_markdown("# Hello\n\n**bold** and %%italic%%");
//!
//! assert_eq!(
//!     result.html,
//!     r#"<h1 id="Title_0">Hello</h1><p><b>bold</b> and <i>italic</i></p>"#
//! );
//! assert_eq!(result.outline[0].title, "Hello");
//! assert!(result.errors.is_empty());
//! ```

mod article;
mod code_block;
mod context;
mod error;
mod fence;
mod html;
mod inline;
mod list;
pub mod metachar;
mod nesting;
mod outline;
mod paragraph;
mod renderer;
mod structure;
mod table;
mod tabs;

pub use article::{Article, FrontMatter, parse_article, split_front_matter};
pub use code_block::CodeBlock;
pub use error::ParseError;
pub use html::{escape_html, unescape_html};
pub use inline::parse_inline;
pub use outline::{ANCHOR_PREFIX, OutlineEntry, anchor_id};
pub use renderer::{RenderResult, Renderer, TableFallback, parse_markdown};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_heading_scenario() {
        let result = parse_markdown("# Hello");
        assert_eq!(result.html, r#"<h1 id="Title_0">Hello</h1>"#);
        assert_eq!(
            result.outline,
            vec![OutlineEntry {
                level: 1,
                title: "Hello".to_owned()
            }]
        );
    }

    #[test]
    fn test_inline_scenario() {
        assert_eq!(
            parse_markdown("**bold** and %%italic%%").html,
            "<p><b>bold</b> and <i>italic</i></p>"
        );
    }

    #[test]
    fn test_nested_list_scenario() {
        assert_eq!(
            parse_markdown("+one\n++two\n+three").html,
            "<ol><li>one<ol><li>two</li></ol></li><li>three</li></ol>"
        );
    }

    #[test]
    fn test_table_scenario() {
        assert_eq!(
            parse_markdown("|A|B|\n|---|---|\n|1|2|").html,
            concat!(
                r#"<div class="MikumarkTableContainer"><table>"#,
                "<tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr>",
                "</table></div>"
            )
        );
    }

    #[test]
    fn test_code_span_scenario() {
        assert_eq!(
            parse_markdown("`**x**`").html,
            r#"<p><code class="MikumarkCode">**x**</code></p>"#
        );
    }

    #[test]
    fn test_bad_table_scenario() {
        let result = parse_markdown("before\n\n|bad|\n\nafter");
        assert_eq!(result.html, "<p>before</p><p>|bad|</p><p>after</p>");
        assert_eq!(
            result.errors,
            vec![ParseError::MalformedTableRow {
                line: 3,
                row: "|bad|".to_owned()
            }]
        );
    }

    #[test]
    fn test_escaped_text_is_literal() {
        assert_eq!(parse_markdown(r"\*not bold\*").html, "<p>*not bold*</p>");
    }

    #[test]
    fn test_headings_align_with_outline() {
        let result = parse_markdown("# A\n\ntext\n\n### B\n\n## C\n\n```\n# not a heading\n```");

        assert_eq!(result.outline.len(), 3);
        assert_eq!(count(&result.html, "<h"), 3);
        for (index, entry) in result.outline.iter().enumerate() {
            let tag = format!(r#"id="{}">{}</h"#, anchor_id(index), entry.title);
            assert!(result.html.contains(&tag), "missing {tag}");
        }
        let levels: Vec<_> = result.outline.iter().map(|e| e.level).collect();
        assert_eq!(levels, [1, 3, 2]);
    }

    #[test]
    fn test_list_tags_balanced() {
        let html = parse_markdown("-a\n--b\n----c\n-d\n---e").html;
        assert_eq!(count(&html, "<ul>"), count(&html, "</ul>"));
        assert_eq!(count(&html, "<li>"), count(&html, "</li>"));

        let mut depth = 0_i32;
        let mut max_depth = 0;
        for (idx, _) in html.match_indices("ul>") {
            if html[..idx].ends_with("</") {
                depth -= 1;
            } else {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
        }
        assert_eq!(depth, 0);
        assert_eq!(max_depth, 4);
    }

    #[test]
    fn test_quotes_stay_open_across_paragraphs() {
        assert_eq!(
            parse_markdown("> one\n\n>> two\n\nout").html,
            "<blockquote><p>one</p><blockquote><p>two</p></blockquote></blockquote><p>out</p>"
        );
    }

    #[test]
    fn test_multiline_quote() {
        assert_eq!(
            parse_markdown("> a\n> b").html,
            "<blockquote><p>a<br/>b</p></blockquote>"
        );
    }

    #[test]
    fn test_code_block_is_immune() {
        let input = "```html\n<b>**x**</b>\n\n# title\n|bad|\n```";
        let result = parse_markdown(input);
        assert_eq!(
            result.html,
            "<pre><code class=\"language-html\">&lt;b&gt;**x**&lt;/b&gt;\n\n# title\n|bad|\n</code></pre>"
        );
        assert!(result.outline.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_code_block_inside_quote() {
        assert_eq!(
            parse_markdown("> intro\n\n>```\n> x\n>```\n\nafter").html,
            "<blockquote><p>intro</p><pre><code>x\n</code></pre></blockquote><p>after</p>"
        );
    }

    #[test]
    fn test_code_block_ends_paragraph() {
        assert_eq!(
            parse_markdown("text\n```\nx\n```\nmore").html,
            "<p>text</p><pre><code>x\n</code></pre><p>more</p>"
        );
    }

    #[test]
    fn test_tab_group() {
        let result = parse_markdown("@@tab\n@One\n# Inside\n\nbody\n@Two\n- item\n@@tab");
        let html = &result.html;

        assert!(html.starts_with(r#"<div class="MikumarkTab"><div class="MikumarkTabButtonContainer">"#));
        assert!(html.contains(r#"MikumarkTabBtn_0 MikumarkTabActive" data-tab-group="0" data-tab="0">One</div>"#));
        assert!(html.contains(r#"MikumarkTabBtn_1" data-tab-group="0" data-tab="1">Two</div>"#));
        assert!(html.contains(
            r#"<div class="MikumarkTabContent_0 MikumarkTab_0_0"><h1 id="Title_0">Inside</h1><p>body</p></div>"#
        ));
        assert!(html.contains(
            r#"<div class="MikumarkTabContent_0 MikumarkTab_0_1" style="display: none;"><ul><li>item</li></ul></div>"#
        ));
        assert!(html.ends_with("</div></div>"));
        assert_eq!(result.outline.len(), 1);
    }

    #[test]
    fn test_unterminated_fence_in_tab_keeps_divs_balanced() {
        let html = parse_markdown("@@tab\n@A\n```\ncode\n@@tab\n\nafter").html;

        assert_eq!(count(&html, "<div"), count(&html, "</div>"));
        assert!(!html.contains("&lt;/div&gt;"));
        assert!(html.contains("<pre><code>code\n@@tab\n\nafter\n</code></pre></div></div></div>"));
    }

    #[test]
    fn test_tab_ids_continue_across_groups() {
        let html = parse_markdown("@@tab\n@a\nx\n@b\ny\n@@tab\n\n@@tab\n@c\nz\n@@tab").html;
        assert!(html.contains("MikumarkTab_1_2"));
        assert!(html.contains(r#"data-tab-group="1" data-tab="2""#));
    }

    #[test]
    fn test_mixed_document() {
        let input = "\
# Guide

: **centered**

---

![Logo](logo.png)

$$E=mc^2$$

<div class=\"note\">raw</div>

See [https://a.b]() and [docs](https://example.com).";

        assert_eq!(
            parse_markdown(input).html,
            concat!(
                r#"<h1 id="Title_0">Guide</h1>"#,
                r#"<p style="text-align:center;"><b>centered</b></p>"#,
                "<hr/>",
                r#"<div class="MikumarkImageContainer"><img class="MikumarkImage" src="logo.png" alt="Logo"><div class="MikumarkImageTitle">Logo</div></div>"#,
                "<p>$$E=mc^2$$</p>",
                r#"<div class="note">raw</div>"#,
                r#"<p>See <a target="_blank" href="https://a.b">https://a.b</a> and <a target="_blank" href="https://example.com">docs</a>.</p>"#,
            )
        );
    }

    #[test]
    fn test_renderer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Renderer>();
        assert_send_sync::<RenderResult>();
    }
}
