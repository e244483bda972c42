//! # Tokenizer
//!
//! Splits one line (or one block's inline text) into a lazy stream of
//! [`Token`]s. Token texts are slices of the input and always concatenate
//! back to it, so any token the parsers cannot use can fall back to
//! literal text without losing a byte.
//!
//! - A line in [`LineContext::Normal`] may start with a [`TokenKind::LineMarker`]
//!   (heading hashes, list bullet, blockquote `>`, fence, thematic break).
//! - Inside a code fence the only marker is a closing fence; every other
//!   line is one literal run.
//! - Inline delimiters (`*`, `_`, `` ` ``, `~`, brackets, parentheses, `!`)
//!   come out as [`TokenKind::DelimiterRun`]. A backslash escape folds the
//!   escaped character into literal text.

pub mod lexer;
pub mod markers;

use std::ops::Range;

use logos::Logos;

use lexer::RawKind;
pub use markers::{Marker, MarkerKind};

/// Parse context of the block enclosing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineContext {
    #[default]
    Normal,
    InsideFence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LineMarker { kind: MarkerKind, level: usize },
    DelimiterRun { ch: char, count: usize },
    LiteralText,
    LineBreak,
}

/// A token borrowing its text from the tokenized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub text: &'s str,
    /// Byte range of `text` within the input.
    pub span: Range<usize>,
}

impl Token<'_> {
    pub fn is_delimiter(&self, ch: char) -> bool {
        matches!(self.kind, TokenKind::DelimiterRun { ch: c, .. } if c == ch)
    }
}

enum Mode<'s> {
    Inline {
        lexer: logos::Lexer<'s, RawKind>,
        base: usize,
    },
    Literal {
        start: usize,
    },
    Done,
}

/// Lazy token stream over one input string.
pub struct Tokens<'s> {
    source: &'s str,
    marker: Option<Token<'s>>,
    mode: Mode<'s>,
}

impl<'s> Tokens<'s> {
    fn inline_from(source: &'s str, marker: Option<Token<'s>>, base: usize) -> Self {
        Self {
            source,
            marker,
            mode: Mode::Inline {
                lexer: RawKind::lexer(&source[base..]),
                base,
            },
        }
    }

    fn token(&self, kind: TokenKind, span: Range<usize>) -> Token<'s> {
        let source = self.source;
        Token {
            kind,
            text: &source[span.clone()],
            span,
        }
    }
}

impl<'s> Iterator for Tokens<'s> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Token<'s>> {
        if let Some(marker) = self.marker.take() {
            return Some(marker);
        }
        match &mut self.mode {
            Mode::Inline { lexer, base } => {
                let raw = lexer.next()?;
                let local = lexer.span();
                let span = local.start + *base..local.end + *base;
                let kind = match raw {
                    Ok(RawKind::Newline) => TokenKind::LineBreak,
                    Ok(raw) => match raw.delimiter() {
                        Some(ch) => TokenKind::DelimiterRun {
                            ch,
                            count: span.len(),
                        },
                        None => TokenKind::LiteralText,
                    },
                    Err(()) => TokenKind::LiteralText,
                };
                Some(self.token(kind, span))
            }
            Mode::Literal { start } => {
                let start = *start;
                self.mode = Mode::Done;
                (start < self.source.len())
                    .then(|| self.token(TokenKind::LiteralText, start..self.source.len()))
            }
            Mode::Done => None,
        }
    }
}

fn marker_token(line: &str, marker: Marker) -> Token<'_> {
    Token {
        kind: TokenKind::LineMarker {
            kind: marker.kind,
            level: marker.level,
        },
        text: &line[..marker.len],
        span: 0..marker.len,
    }
}

/// Tokenizes one source line (without its newline).
///
/// The first token is the line's marker when it has one.
pub fn tokenize_line(line: &str, context: LineContext) -> Tokens<'_> {
    match context {
        LineContext::Normal => match markers::scan(line) {
            Some(marker) => Tokens::inline_from(line, Some(marker_token(line, marker)), marker.len),
            None => Tokens::inline_from(line, None, 0),
        },
        LineContext::InsideFence => {
            let (marker, start) = match markers::scan_closing_fence(line) {
                Some(marker) => (Some(marker_token(line, marker)), marker.len),
                None => (None, 0),
            };
            Tokens {
                source: line,
                marker,
                mode: Mode::Literal { start },
            }
        }
    }
}

/// Tokenizes a block's inline text; no line markers are recognised.
pub fn tokenize_inline(text: &str) -> Tokens<'_> {
    Tokens::inline_from(text, None, 0)
}

/// The marker opening `line`, if any.
pub fn line_marker(line: &str, context: LineContext) -> Option<(MarkerKind, usize, usize)> {
    match tokenize_line(line, context).next()? {
        Token {
            kind: TokenKind::LineMarker { kind, level },
            span,
            ..
        } => Some((kind, level, span.end)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn concat(tokens: Tokens<'_>) -> String {
        tokens.map(|t| t.text).collect()
    }

    fn shapes(tokens: Tokens<'_>) -> Vec<(TokenKind, &str)> {
        tokens.map(|t| (t.kind, t.text)).collect()
    }

    #[rstest]
    #[case("")]
    #[case("plain words")]
    #[case("## Heading with *emph* ##")]
    #[case("- [ ] task with `code`")]
    #[case(r"\*not emph\* and \\ and \q")]
    #[case("> quote **bold** [link](x)")]
    #[case("1. ![img](a.png) ~~gone~~\r")]
    #[case("``` rust")]
    #[case("unterminated **run and `tick")]
    #[case("ünïcödé _ok_ 日本語")]
    fn tokens_reproduce_the_line(#[case] line: &str) {
        assert_eq!(concat(tokenize_line(line, LineContext::Normal)), line);
        assert_eq!(concat(tokenize_line(line, LineContext::InsideFence)), line);
        assert_eq!(concat(tokenize_inline(line)), line);
    }

    #[test]
    fn heading_marker_comes_first() {
        let tokens = shapes(tokenize_line("## A *b*", LineContext::Normal));
        assert_eq!(
            tokens,
            vec![
                (
                    TokenKind::LineMarker {
                        kind: MarkerKind::Heading,
                        level: 2
                    },
                    "## "
                ),
                (TokenKind::LiteralText, "A "),
                (TokenKind::DelimiterRun { ch: '*', count: 1 }, "*"),
                (TokenKind::LiteralText, "b"),
                (TokenKind::DelimiterRun { ch: '*', count: 1 }, "*"),
            ]
        );
    }

    #[test]
    fn escaped_delimiter_is_literal() {
        let tokens = shapes(tokenize_inline(r"a\*b"));
        assert!(
            tokens
                .iter()
                .all(|(kind, _)| *kind == TokenKind::LiteralText)
        );
    }

    #[test]
    fn delimiter_runs_are_counted() {
        let tokens = shapes(tokenize_inline("***x``"));
        assert_eq!(tokens[0].0, TokenKind::DelimiterRun { ch: '*', count: 3 });
        assert_eq!(tokens[2].0, TokenKind::DelimiterRun { ch: '`', count: 2 });
    }

    #[test]
    fn newline_in_inline_text_is_a_line_break() {
        let tokens = shapes(tokenize_inline("a\nb"));
        assert_eq!(tokens[1], (TokenKind::LineBreak, "\n"));
    }

    #[test]
    fn fence_body_is_one_literal_run() {
        let tokens = shapes(tokenize_line("# not a heading *", LineContext::InsideFence));
        assert_eq!(tokens, vec![(TokenKind::LiteralText, "# not a heading *")]);
    }

    #[test]
    fn closing_fence_inside_fence_is_a_marker() {
        assert_eq!(
            line_marker("```", LineContext::InsideFence),
            Some((MarkerKind::Fence { fence: '`' }, 3, 3))
        );
        assert_eq!(line_marker("- item", LineContext::InsideFence), None);
    }

    #[test]
    fn spans_are_absolute_within_the_line() {
        let tokens: Vec<_> = tokenize_line("> a*", LineContext::Normal).collect();
        assert_eq!(tokens.last().map(|t| t.span.clone()), Some(3..4));
    }

    #[test]
    fn tokenizing_is_restartable() {
        let line = "- *x*";
        let first: Vec<_> = tokenize_line(line, LineContext::Normal).collect();
        let second: Vec<_> = tokenize_line(line, LineContext::Normal).collect();
        assert_eq!(first, second);
    }
}
