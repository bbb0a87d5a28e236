//! Inline span parsing.
//!
//! Turns one run of paragraph text into HTML. The passes run in a fixed order:
//!
//! 1. Line breaks become `<br/>`.
//! 2. Code spans (`` `...` ``) are rendered before anything else, so their
//!    payload is immune to escaping and to every span rule.
//! 3. Backslash escapes are protected (see [`metachar`](crate::metachar)).
//! 4. Span rules are applied one after another, each as a left-to-right,
//!    non-overlapping, shortest-match replacement:
//!    tag `#(..)#`, bold `**..**`, italic `%%..%%`, strikethrough `~..~`,
//!    color `[[red:..#]]`, self link `[url]()`, link `[text](url)`.
//! 5. Protected characters are restored.
//!
//! Unmatched delimiters are never an error; they stay literal text.
//!
//! # Example
//!
//! ```
//! use mikumark::parse_inline;
//!
//! assert_eq!(parse_inline("**bold** and %%italic%%"), "<b>bold</b> and <i>italic</i>");
//! assert_eq!(parse_inline(r"\*\*not bold\*\*"), "**not bold**");
//! ```

use std::ops::Range;

use crate::html::escape_html;
use crate::metachar::{Token, escape_tokens, recover};

/// One element of a span pattern.
#[derive(Clone, Copy)]
enum Atom {
    /// Exact run of unprotected characters.
    Lit(&'static str),
    /// Shortest capture of one or more tokens of any kind.
    Lazy,
    /// Shortest capture of one or more unprotected characters accepted by the
    /// predicate, which receives the position inside the capture.
    LazyClass(fn(usize, char) -> bool),
}

/// A span rule: a pattern and the replacement built from its captures.
struct Rule {
    atoms: &'static [Atom],
    render: fn(&[&[Token]]) -> Vec<Token>,
}

const CODE_SPAN: &[Atom] = &[Atom::Lit("`"), Atom::Lazy, Atom::Lit("`")];

/// Span rules in precedence order.
const RULES: &[Rule] = &[
    Rule {
        atoms: &[Atom::Lit("#("), Atom::Lazy, Atom::Lit(")#")],
        render: render_tag,
    },
    Rule {
        atoms: &[Atom::Lit("**"), Atom::Lazy, Atom::Lit("**")],
        render: render_bold,
    },
    Rule {
        atoms: &[Atom::Lit("%%"), Atom::Lazy, Atom::Lit("%%")],
        render: render_italic,
    },
    Rule {
        atoms: &[Atom::Lit("~"), Atom::Lazy, Atom::Lit("~")],
        render: render_strike,
    },
    Rule {
        atoms: &[
            Atom::Lit("[["),
            Atom::LazyClass(is_color_char),
            Atom::Lit(":"),
            Atom::Lazy,
            Atom::Lit("#]]"),
        ],
        render: render_color,
    },
    Rule {
        atoms: &[Atom::Lit("["), Atom::Lazy, Atom::Lit("]()")],
        render: render_self_link,
    },
    Rule {
        atoms: &[
            Atom::Lit("["),
            Atom::Lazy,
            Atom::Lit("]("),
            Atom::Lazy,
            Atom::Lit(")"),
        ],
        render: render_link,
    },
];

/// Parse one run of inline text into HTML.
#[must_use]
pub fn parse_inline(text: &str) -> String {
    let tokens: Vec<Token> = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' => Token::markup("<br/>"),
            c => Token::Char(c),
        })
        .collect();

    let tokens = replace_all(tokens, CODE_SPAN, |c| vec![inline_code(c[0])]);
    let mut tokens = escape_tokens(tokens);
    for rule in RULES {
        tokens = replace_all(tokens, rule.atoms, rule.render);
    }

    recover(&tokens)
}

/// Render a code span. The payload is shown exactly as written.
fn inline_code(payload: &[Token]) -> Token {
    let mut html = String::from(r#"<code class="MikumarkCode">"#);
    for token in payload {
        match token {
            Token::Char(c) | Token::Literal(c) => {
                let mut buf = [0; 4];
                html.push_str(&escape_html(c.encode_utf8(&mut buf)));
            }
            Token::Markup(markup) => html.push_str(markup),
        }
    }
    html.push_str("</code>");
    Token::Markup(html)
}

fn render_tag(c: &[&[Token]]) -> Vec<Token> {
    wrap(r#"<span class="MikumarkTag">"#, c[0], "</span>")
}

fn render_bold(c: &[&[Token]]) -> Vec<Token> {
    wrap("<b>", c[0], "</b>")
}

fn render_italic(c: &[&[Token]]) -> Vec<Token> {
    wrap("<i>", c[0], "</i>")
}

fn render_strike(c: &[&[Token]]) -> Vec<Token> {
    wrap("<del>", c[0], "</del>")
}

fn render_color(c: &[&[Token]]) -> Vec<Token> {
    let open = format!(r#"<span style="color:{};">"#, recover(c[0]));
    wrap(&open, c[1], "</span>")
}

fn render_self_link(c: &[&[Token]]) -> Vec<Token> {
    link(c[0], c[0])
}

fn render_link(c: &[&[Token]]) -> Vec<Token> {
    link(c[0], c[1])
}

fn wrap(open: &str, inner: &[Token], close: &str) -> Vec<Token> {
    let mut out = Vec::with_capacity(inner.len() + 2);
    out.push(Token::markup(open));
    out.extend_from_slice(inner);
    out.push(Token::markup(close));
    out
}

fn link(text: &[Token], url: &[Token]) -> Vec<Token> {
    let open = format!(
        r#"<a target="_blank" href="{}">"#,
        escape_html(&recover(url))
    );
    wrap(&open, text, "</a>")
}

fn is_color_char(pos: usize, c: char) -> bool {
    c.is_ascii_alphanumeric() || (pos == 0 && c == '#')
}

/// Outcome of matching a pattern at one position.
enum Match {
    /// Matched up to the given end.
    At(usize),
    No,
    /// A closing literal does not occur again, so no later position can match.
    Exhausted,
}

/// Token stream plus next-occurrence tables for the literals that close a
/// [`Atom::Lazy`] capture.
///
/// A lazy capture ends at the first following occurrence of its closer. Every
/// rule continues after that closer with literals and further closers only,
/// so a later occurrence could never match where the first one failed. Each
/// position is therefore tried once and a rule runs in linear time.
struct Scanner<'t> {
    tokens: &'t [Token],
    closers: Vec<(&'static str, Vec<usize>)>,
}

impl<'t> Scanner<'t> {
    fn new(tokens: &'t [Token], atoms: &[Atom]) -> Self {
        let closers = atoms
            .windows(2)
            .filter_map(|pair| match pair {
                [Atom::Lazy, Atom::Lit(lit)] => Some((*lit, next_occurrences(tokens, lit))),
                _ => None,
            })
            .collect();
        Self { tokens, closers }
    }

    /// First position at or after `from` where `lit` occurs.
    fn next_closer(&self, lit: &str, from: usize) -> Option<usize> {
        let (_, next) = self.closers.iter().find(|(closer, _)| *closer == lit)?;
        next.get(from).copied().filter(|&pos| pos < self.tokens.len())
    }
}

/// `next[i]` is the first position `>= i` where `lit` occurs, or the token
/// count when there is none.
fn next_occurrences(tokens: &[Token], lit: &str) -> Vec<usize> {
    let mut next = vec![tokens.len(); tokens.len() + 1];
    for pos in (0..tokens.len()).rev() {
        next[pos] = if match_literal(tokens, pos, lit).is_some() {
            pos
        } else {
            next[pos + 1]
        };
    }
    next
}

/// Replace every non-overlapping match of `atoms`, scanning left to right.
fn replace_all(
    tokens: Vec<Token>,
    atoms: &[Atom],
    render: impl Fn(&[&[Token]]) -> Vec<Token>,
) -> Vec<Token> {
    let scanner = Scanner::new(&tokens, atoms);
    let mut out = Vec::with_capacity(tokens.len());
    let mut captures = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        captures.clear();
        match match_atoms(&scanner, pos, atoms, &mut captures) {
            Match::At(end) => {
                let groups: Vec<&[Token]> = captures.iter().map(|r| &tokens[r.clone()]).collect();
                out.extend(render(&groups));
                pos = end;
            }
            Match::No => {
                out.push(tokens[pos].clone());
                pos += 1;
            }
            Match::Exhausted => break,
        }
    }
    out.extend_from_slice(&tokens[pos..]);

    out
}

/// Match `atoms` at `pos`, preferring the shortest captures.
///
/// Capture ranges are left in `captures`.
fn match_atoms(
    scanner: &Scanner<'_>,
    pos: usize,
    atoms: &[Atom],
    captures: &mut Vec<Range<usize>>,
) -> Match {
    let Some((atom, rest)) = atoms.split_first() else {
        return Match::At(pos);
    };

    match *atom {
        Atom::Lit(lit) => match match_literal(scanner.tokens, pos, lit) {
            Some(end) => match_atoms(scanner, end, rest, captures),
            None => Match::No,
        },
        Atom::Lazy => {
            let Some(&Atom::Lit(closer)) = rest.first() else {
                return Match::No;
            };
            let Some(end) = scanner.next_closer(closer, pos + 1) else {
                return Match::Exhausted;
            };
            captures.push(pos..end);
            match_atoms(scanner, end, rest, captures)
        }
        Atom::LazyClass(accept) => {
            let mark = captures.len();
            for end in pos + 1..=scanner.tokens.len() {
                let ok = matches!(scanner.tokens[end - 1], Token::Char(c) if accept(end - 1 - pos, c));
                if !ok {
                    break;
                }
                captures.push(pos..end);
                match match_atoms(scanner, end, rest, captures) {
                    Match::No => captures.truncate(mark),
                    done => return done,
                }
            }
            Match::No
        }
    }
}

fn match_literal(tokens: &[Token], pos: usize, lit: &str) -> Option<usize> {
    let mut end = pos;
    for c in lit.chars() {
        if !tokens.get(end)?.is_char(c) {
            return None;
        }
        end += 1;
    }
    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline("just text"), "just text");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(parse_inline("a\nb"), "a<br/>b");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            parse_inline("**bold** and %%italic%%"),
            "<b>bold</b> and <i>italic</i>"
        );
    }

    #[test]
    fn test_bold_is_shortest_match() {
        assert_eq!(parse_inline("**a** b **c**"), "<b>a</b> b <b>c</b>");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(parse_inline("~gone~"), "<del>gone</del>");
    }

    #[test]
    fn test_tag() {
        assert_eq!(
            parse_inline("#(rust)#"),
            r#"<span class="MikumarkTag">rust</span>"#
        );
    }

    #[test]
    fn test_color() {
        assert_eq!(
            parse_inline("[[red:warm#]] [[#00ff00:green#]]"),
            r#"<span style="color:red;">warm</span> <span style="color:#00ff00;">green</span>"#
        );
    }

    #[test]
    fn test_color_rejects_bad_name() {
        assert_eq!(parse_inline("[[re d:x#]]"), "[[re d:x#]]");
    }

    #[test]
    fn test_self_link() {
        assert_eq!(
            parse_inline("[https://example.com]()"),
            r#"<a target="_blank" href="https://example.com">https://example.com</a>"#
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            parse_inline("see [docs](https://a.b/c?x=1&y=2) now"),
            r#"see <a target="_blank" href="https://a.b/c?x=1&amp;y=2">docs</a> now"#
        );
    }

    #[test]
    fn test_link_with_bold_text() {
        assert_eq!(
            parse_inline("[**x**](u)"),
            r#"<a target="_blank" href="u"><b>x</b></a>"#
        );
    }

    #[test]
    fn test_italic_inside_bold() {
        assert_eq!(parse_inline("**%%x%%**"), "<b><i>x</i></b>");
    }

    #[test]
    fn test_code_span_is_literal() {
        assert_eq!(
            parse_inline("`**x**`"),
            r#"<code class="MikumarkCode">**x**</code>"#
        );
    }

    #[test]
    fn test_code_span_escapes_html_and_keeps_backslashes() {
        assert_eq!(
            parse_inline(r"`<b>\*</b>`"),
            r#"<code class="MikumarkCode">&lt;b&gt;\*&lt;/b&gt;</code>"#
        );
    }

    #[test]
    fn test_code_span_across_lines() {
        assert_eq!(
            parse_inline("`a\nb`"),
            r#"<code class="MikumarkCode">a<br/>b</code>"#
        );
    }

    #[test]
    fn test_escaped_delimiters() {
        assert_eq!(parse_inline(r"\*not bold\*"), "*not bold*");
        assert_eq!(parse_inline(r"\*\*not bold\*\*"), "**not bold**");
        assert_eq!(parse_inline(r"\~x\~"), "~x~");
        assert_eq!(parse_inline(r"\[a\](b)"), "[a](b)");
    }

    #[test]
    fn test_unmatched_delimiters_are_literal() {
        assert_eq!(parse_inline("a ** b"), "a ** b");
        assert_eq!(parse_inline("50% off"), "50% off");
        assert_eq!(parse_inline("[open"), "[open");
    }

    #[test]
    fn test_empty_span_does_not_match() {
        assert_eq!(parse_inline("~~"), "~~");
    }

    #[test]
    fn test_precedence_bold_before_strike() {
        assert_eq!(parse_inline("**~x~**"), "<b><del>x</del></b>");
    }

    #[test]
    fn test_unclosed_link_is_literal() {
        assert_eq!(parse_inline("[a](b"), "[a](b");
        assert_eq!(
            parse_inline("[a](b) and [c](d)"),
            r#"<a target="_blank" href="b">a</a> and <a target="_blank" href="d">c</a>"#
        );
    }

    #[test]
    fn test_unclosed_brackets_run_in_linear_time() {
        let brackets = "[x] ".repeat(20_000);
        let links = "[x](y ".repeat(3_000);

        let start = std::time::Instant::now();
        assert_eq!(parse_inline(&brackets), brackets);
        assert_eq!(parse_inline(&links), links);
        assert!(
            start.elapsed() < std::time::Duration::from_secs(5),
            "took {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn test_many_closed_spans() {
        let input = "**a** [b](c) ".repeat(2_000);
        let expected = r#"<b>a</b> <a target="_blank" href="c">b</a> "#.repeat(2_000);
        assert_eq!(parse_inline(&input), expected);
    }
}
