use std::mem;

use crate::parsing::tokens::{Token, TokenKind, tokenize_inline};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Emphasis, Flanking, Link},
    types::{InlineSpan, Strength, plain_text, unescape},
};

/// Parses a block's inline text into nested [`InlineSpan`]s.
///
/// `text` is the block content with container prefixes removed and lines
/// joined by `\n`. Anything that does not form a construct stays literal
/// text; parsing never fails.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    parse_inline_with_diagnostics(text).0
}

/// Like [`parse_inline`], also returning the line (index within `text`) of
/// every link whose destination was opened with `](` but never closed.
pub fn parse_inline_with_diagnostics(text: &str) -> (Vec<InlineSpan>, Vec<usize>) {
    let tokens: Vec<Token<'_>> = tokenize_inline(text).collect();
    let mut scan = Scan::new(text);
    scan.run(&mut Cursor::new(&tokens));
    let spans = resolve(scan.pieces);
    (spans, scan.unterminated)
}

/// First pass output: code spans and links resolved, emphasis delimiters
/// still pending.
#[derive(Debug)]
enum Piece {
    Text(String),
    Break,
    Code(String),
    Delim(Delim),
    /// `[` or `![` waiting for its `]`. Inactive openers cannot form links.
    Open {
        image: bool,
        active: bool,
    },
    Link {
        target: String,
        image: bool,
        children: Vec<Piece>,
    },
}

#[derive(Debug, Clone, Copy)]
struct Delim {
    ch: char,
    count: usize,
    flank: Flanking,
}

enum Destination {
    Found(String),
    /// Reached a line break or the end of the text before `)`.
    Unterminated(usize),
    Invalid,
}

struct Scan<'s> {
    text: &'s str,
    pieces: Vec<Piece>,
    /// Indices into `pieces` of `Open` entries, innermost last.
    brackets: Vec<usize>,
    unterminated: Vec<usize>,
}

impl<'s> Scan<'s> {
    fn new(text: &'s str) -> Self {
        Self {
            text,
            pieces: vec![],
            brackets: vec![],
            unterminated: vec![],
        }
    }

    fn run(&mut self, cur: &mut Cursor<'_, '_>) {
        while let Some(tok) = cur.bump() {
            match tok.kind {
                TokenKind::LineBreak => self.pieces.push(Piece::Break),
                TokenKind::LiteralText | TokenKind::LineMarker { .. } => self.push_text(tok.text),
                TokenKind::DelimiterRun { ch, count } if ch == CodeSpan::TICK => {
                    match cur.find_run(ch, count) {
                        Some(close) => {
                            let raw = CodeSpan::normalize(&cur.text_between(cur.i, close));
                            self.pieces.push(Piece::Code(raw));
                            cur.i = close + 1;
                        }
                        None => self.push_text(tok.text),
                    }
                }
                TokenKind::DelimiterRun { ch, count } if Emphasis::is_delimiter(ch) => {
                    if count < Emphasis::min_run(ch) {
                        self.push_text(tok.text);
                    } else {
                        let before = self.text[..tok.span.start].chars().next_back();
                        let after = self.text[tok.span.end..].chars().next();
                        self.pieces.push(Piece::Delim(Delim {
                            ch,
                            count,
                            flank: Emphasis::flanking(ch, before, after),
                        }));
                    }
                }
                TokenKind::DelimiterRun { ch, .. }
                    if ch == Link::IMAGE && cur.peek().is_some_and(|t| t.is_delimiter(Link::OPEN)) =>
                {
                    cur.bump();
                    self.open_bracket(true);
                }
                TokenKind::DelimiterRun { ch, .. } if ch == Link::OPEN => self.open_bracket(false),
                TokenKind::DelimiterRun { ch, .. } if ch == Link::CLOSE => self.close_bracket(cur),
                TokenKind::DelimiterRun { .. } => self.push_text(tok.text),
            }
        }
    }

    fn push_text(&mut self, s: &str) {
        if let Some(Piece::Text(t)) = self.pieces.last_mut() {
            t.push_str(s);
        } else if !s.is_empty() {
            self.pieces.push(Piece::Text(s.to_string()));
        }
    }

    fn open_bracket(&mut self, image: bool) {
        self.brackets.push(self.pieces.len());
        self.pieces.push(Piece::Open {
            image,
            active: true,
        });
    }

    fn close_bracket(&mut self, cur: &mut Cursor<'_, '_>) {
        let close = Link::CLOSE.to_string();
        let Some(at) = self.brackets.pop() else {
            self.push_text(&close);
            return;
        };
        let Piece::Open { image, active: true } = self.pieces[at] else {
            self.push_text(&close);
            return;
        };

        match self.destination(cur) {
            Destination::Found(target) => {
                let children = self.pieces.split_off(at + 1);
                self.pieces.pop();
                self.pieces.push(Piece::Link {
                    target,
                    image,
                    children,
                });
                // No links inside links.
                if !image {
                    for &open in &self.brackets {
                        if let Piece::Open {
                            image: false,
                            active,
                        } = &mut self.pieces[open]
                        {
                            *active = false;
                        }
                    }
                }
            }
            Destination::Unterminated(line) => {
                self.unterminated.push(line);
                self.push_text(&close);
            }
            Destination::Invalid => self.push_text(&close),
        }
    }

    /// Reads `(target)` directly after a `]`, consuming it only on success.
    fn destination(&self, cur: &mut Cursor<'_, '_>) -> Destination {
        let Some(open) = cur.peek().filter(|t| t.is_delimiter(Link::TARGET_OPEN)) else {
            return Destination::Invalid;
        };
        let line = self.text[..open.span.start].matches('\n').count();
        let mut n = 1;
        while let Some(tok) = cur.peek_at(n) {
            if tok.is_delimiter(Link::TARGET_CLOSE) {
                let target = unescape(&cur.text_between(cur.i + 1, cur.i + n)).into_owned();
                cur.bump_n(n + 1);
                return Destination::Found(target);
            }
            if tok.kind == TokenKind::LineBreak {
                return Destination::Unterminated(line);
            }
            if !Link::allowed_in_target(tok.text) {
                return Destination::Invalid;
            }
            n += 1;
        }
        Destination::Unterminated(line)
    }
}

/// An emphasis opener waiting for its closer, collecting what follows it.
struct Frame {
    delim: Delim,
    /// Delimiters still unused.
    remaining: usize,
    children: Vec<InlineSpan>,
}

impl Frame {
    fn literal(&self) -> String {
        self.delim.ch.to_string().repeat(self.remaining)
    }
}

/// Appends `span`, merging adjacent text.
fn push_span(out: &mut Vec<InlineSpan>, span: InlineSpan) {
    if let InlineSpan::Text(s) = &span {
        if s.is_empty() {
            return;
        }
        if let Some(InlineSpan::Text(prev)) = out.last_mut() {
            prev.push_str(s);
            return;
        }
    }
    out.push(span);
}

fn sink<'a>(frames: &'a mut [Frame], root: &'a mut Vec<InlineSpan>) -> &'a mut Vec<InlineSpan> {
    match frames.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

/// Pops `frame` back into its parent as literal delimiters plus content.
fn collapse(frames: &mut Vec<Frame>, root: &mut Vec<InlineSpan>) {
    if let Some(frame) = frames.pop() {
        let parent = sink(frames, root);
        push_span(parent, InlineSpan::Text(frame.literal()));
        for child in frame.children {
            push_span(parent, child);
        }
    }
}

/// Second pass: delimiter-stack emphasis matching over one nesting level.
fn resolve(pieces: Vec<Piece>) -> Vec<InlineSpan> {
    let mut root = vec![];
    let mut frames: Vec<Frame> = vec![];

    for piece in pieces {
        let span = match piece {
            Piece::Delim(delim) => {
                match_delimiter(&mut frames, &mut root, delim);
                continue;
            }
            Piece::Text(s) => InlineSpan::Text(s),
            Piece::Break => InlineSpan::LineBreak,
            Piece::Code(raw) => InlineSpan::CodeSpan { raw },
            Piece::Open { image, .. } => {
                InlineSpan::Text(if image { "![" } else { "[" }.to_string())
            }
            Piece::Link {
                target,
                image: false,
                children,
            } => InlineSpan::Link {
                target,
                children: resolve(children),
            },
            Piece::Link {
                target,
                image: true,
                children,
            } => InlineSpan::Image {
                target,
                alt: plain_text(&resolve(children)),
            },
        };
        push_span(sink(&mut frames, &mut root), span);
    }

    while !frames.is_empty() {
        collapse(&mut frames, &mut root);
    }
    root
}

fn match_delimiter(frames: &mut Vec<Frame>, root: &mut Vec<InlineSpan>, closer: Delim) {
    let mut remaining = closer.count;

    if closer.flank.can_close {
        while remaining > 0 {
            let Some(k) = frames.iter().rposition(|f| {
                f.delim.ch == closer.ch
                    && Emphasis::can_pair((f.delim.flank, f.delim.count), (closer.flank, closer.count))
            }) else {
                break;
            };
            if frames[k].remaining < Emphasis::min_run(closer.ch)
                || remaining < Emphasis::min_run(closer.ch)
            {
                break;
            }
            while frames.len() > k + 1 {
                collapse(frames, root);
            }

            let Some(opener) = frames.last_mut() else {
                break;
            };
            let used = Emphasis::take(closer.ch, opener.remaining, remaining);
            opener.remaining -= used;
            remaining -= used;

            let children = mem::take(&mut opener.children);
            let node = if closer.ch == Emphasis::TILDE {
                InlineSpan::Strikethrough(children)
            } else {
                InlineSpan::Emphasis {
                    strength: if used == 2 {
                        Strength::Strong
                    } else {
                        Strength::Regular
                    },
                    children,
                }
            };

            if opener.remaining == 0 {
                frames.pop();
                push_span(sink(frames, root), node);
            } else {
                opener.children.push(node);
            }
        }
    }

    if remaining == 0 {
        return;
    }
    if closer.flank.can_open {
        frames.push(Frame {
            delim: closer,
            remaining,
            children: vec![],
        });
    } else {
        let literal = closer.ch.to_string().repeat(remaining);
        push_span(sink(frames, root), InlineSpan::Text(literal));
    }
}
