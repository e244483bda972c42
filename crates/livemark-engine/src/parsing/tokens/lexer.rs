//! Logos lexer for the inline part of a line.
//!
//! Every byte of the input lands in exactly one token, so concatenating the
//! token texts reproduces the input. Characters with inline meaning get their
//! own variants; everything else is grouped into `Text` runs.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    /// Backslash followed by ASCII punctuation; always literal.
    #[regex(r"\\[!-/:-@\[-`{-~]")]
    Escape,

    /// A backslash that escapes nothing.
    #[token("\\")]
    Backslash,

    #[regex(r"\*+")]
    Stars,

    #[regex(r"_+")]
    Underscores,

    #[regex(r"`+")]
    Backticks,

    #[regex(r"~+")]
    Tildes,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("!")]
    Bang,

    #[regex(r"\r?\n")]
    Newline,

    /// Any run of characters without inline meaning.
    #[regex(r"[^\\*_`~\[\]()!\n]+")]
    Text,
}

impl RawKind {
    /// The delimiter character for runs and single-character delimiters.
    pub fn delimiter(self) -> Option<char> {
        match self {
            RawKind::Stars => Some('*'),
            RawKind::Underscores => Some('_'),
            RawKind::Backticks => Some('`'),
            RawKind::Tildes => Some('~'),
            RawKind::LBracket => Some('['),
            RawKind::RBracket => Some(']'),
            RawKind::LParen => Some('('),
            RawKind::RParen => Some(')'),
            RawKind::Bang => Some('!'),
            RawKind::Escape | RawKind::Backslash | RawKind::Newline | RawKind::Text => None,
        }
    }
}
