/// Emphasis and strikethrough delimiters.
pub struct Emphasis;

/// Whether a delimiter run may open and/or close a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flanking {
    pub can_open: bool,
    pub can_close: bool,
}

fn is_space(c: Option<char>) -> bool {
    c.is_none_or(char::is_whitespace)
}

fn is_punct(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace()))
}

impl Emphasis {
    pub const STAR: char = '*';
    pub const UNDERSCORE: char = '_';
    pub const TILDE: char = '~';

    /// Characters whose runs take part in delimiter matching.
    pub fn is_delimiter(ch: char) -> bool {
        matches!(ch, Self::STAR | Self::UNDERSCORE | Self::TILDE)
    }

    /// Run length needed on both sides to form a span. Strikethrough needs a
    /// double tilde; a single `~` stays literal.
    pub fn min_run(ch: char) -> usize {
        if ch == Self::TILDE { 2 } else { 1 }
    }

    /// Classifies a run of `ch` from the characters around it. `None` is the
    /// start or end of the text.
    pub fn flanking(ch: char, before: Option<char>, after: Option<char>) -> Flanking {
        let left = !is_space(after) && (!is_punct(after) || is_space(before) || is_punct(before));
        let right = !is_space(before) && (!is_punct(before) || is_space(after) || is_punct(after));
        if ch == Self::UNDERSCORE {
            Flanking {
                can_open: left && (!right || is_punct(before)),
                can_close: right && (!left || is_punct(after)),
            }
        } else {
            Flanking {
                can_open: left,
                can_close: right,
            }
        }
    }

    /// The "rule of three": a run that can both open and close only pairs
    /// when the combined original lengths are not a multiple of three, unless
    /// both are.
    pub fn can_pair(opener: (Flanking, usize), closer: (Flanking, usize)) -> bool {
        let (open_flank, open_len) = opener;
        let (close_flank, close_len) = closer;
        let either_both = open_flank.can_close || close_flank.can_open;
        !either_both || (open_len + close_len) % 3 != 0 || (open_len % 3 == 0 && close_len % 3 == 0)
    }

    /// Delimiters consumed by a match: two when both sides have two.
    pub fn take(ch: char, opener: usize, closer: usize) -> usize {
        if ch == Self::TILDE || (opener >= 2 && closer >= 2) {
            2
        } else {
            1
        }
    }
}
