use crate::parsing::tokens::{Token, TokenKind};

/// A cursor over a block's token stream with position tracking.
///
/// Lookahead helpers never move the cursor; callers `bump` past what they
/// consumed.
#[derive(Clone)]
pub struct Cursor<'t, 's> {
    tokens: &'t [Token<'s>],
    /// Index of the next token.
    pub i: usize,
}

impl<'t, 's> Cursor<'t, 's> {
    pub fn new(tokens: &'t [Token<'s>]) -> Self {
        Self { tokens, i: 0 }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&'t Token<'s>> {
        self.tokens.get(self.i)
    }

    /// The token `n` places after the current one.
    pub fn peek_at(&self, n: usize) -> Option<&'t Token<'s>> {
        self.tokens.get(self.i + n)
    }

    pub fn bump(&mut self) -> Option<&'t Token<'s>> {
        let t = self.tokens.get(self.i)?;
        self.i += 1;
        Some(t)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Index of the first token at or after the current one that is a
    /// delimiter run of exactly `count` `ch` characters.
    pub fn find_run(&self, ch: char, count: usize) -> Option<usize> {
        self.tokens[self.i.min(self.tokens.len())..]
            .iter()
            .position(|t| t.kind == TokenKind::DelimiterRun { ch, count })
            .map(|offset| self.i + offset)
    }

    /// Concatenated text of tokens `from..to`.
    pub fn text_between(&self, from: usize, to: usize) -> String {
        self.tokens[from..to].iter().map(|t| t.text).collect()
    }
}
