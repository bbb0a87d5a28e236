//! Metacharacter protection.
//!
//! Mikumark reserves fifteen characters for markup. A literal use of one of
//! them is written with a leading backslash (`\*`, `\#`, ...). The codec turns
//! such occurrences into [`Token::Literal`] values: span rules only ever match
//! [`Token::Char`], so a protected character can never be mistaken for a
//! delimiter. [`recover`] flattens a token stream back into text.
//!
//! Protection is carried in the token type rather than in placeholder strings,
//! so nothing the author writes can collide with it.
//!
//! # Example
//!
//! ```
//! use mikumark::metachar::{Token, escape, recover};
//!
//! let tokens = escape(r"\*not bold\*");
//! assert_eq!(tokens[0], Token::Literal('*'));
//! assert_eq!(recover(&tokens), "*not bold*");
//! ```

/// Characters with a markup meaning somewhere in the grammar.
pub const METACHARS: [char; 15] = [
    '*', '~', '`', '[', ']', '(', ')', '$', '|', '+', '-', '\\', '#', '&', '%',
];

/// A unit of inline text as seen by the span rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Ordinary character, eligible as a span delimiter.
    Char(char),
    /// Protected character, rendered as-is and never matched as a delimiter.
    Literal(char),
    /// Already-rendered HTML, opaque to every span rule.
    Markup(String),
}

impl Token {
    /// Create a markup token.
    pub fn markup(html: impl Into<String>) -> Self {
        Self::Markup(html.into())
    }

    /// Check whether this token is the unprotected character `c`.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Self::Char(ch) if *ch == c)
    }

    /// Append the textual form of this token to `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Self::Char(c) | Self::Literal(c) => out.push(*c),
            Self::Markup(html) => out.push_str(html),
        }
    }
}

/// Check whether `c` is one of the reserved [`METACHARS`].
#[must_use]
pub fn is_metachar(c: char) -> bool {
    METACHARS.contains(&c)
}

/// Split text into unprotected character tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    text.chars().map(Token::Char).collect()
}

/// Protect every backslash-escaped metacharacter in `text`.
///
/// Escapes are resolved left to right, so `\\*` yields a literal backslash
/// followed by a live `*`. A backslash before any other character is kept.
#[must_use]
pub fn escape(text: &str) -> Vec<Token> {
    escape_tokens(tokenize(text))
}

/// Protect backslash-escaped metacharacters in an existing token stream.
///
/// Only adjacent [`Token::Char`] pairs are considered; markup and already
/// protected tokens pass through unchanged.
#[must_use]
pub fn escape_tokens(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        if token.is_char('\\')
            && let Some(Token::Char(next)) = iter.peek()
            && is_metachar(*next)
        {
            let next = *next;
            iter.next();
            out.push(Token::Literal(next));
            continue;
        }
        out.push(token);
    }

    out
}

/// Protect every metacharacter in `text`, escaped or not.
///
/// Used to freeze a fragment so that no later pass reinterprets it.
#[must_use]
pub fn cover_all(text: &str) -> Vec<Token> {
    text.chars()
        .map(|c| {
            if is_metachar(c) {
                Token::Literal(c)
            } else {
                Token::Char(c)
            }
        })
        .collect()
}

/// Flatten tokens back into text, restoring every protected character.
#[must_use]
pub fn recover(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.len());
    for token in tokens {
        token.write_to(&mut out);
    }
    out
}
