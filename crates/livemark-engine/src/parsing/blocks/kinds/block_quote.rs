use crate::parsing::blocks::{classify::LineClass, content::ContentLine};

/// Blockquote syntax.
///
/// A blockquote is a run of consecutive `>` lines. There is no lazy
/// continuation: a line without `>` ends the quote.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// The quoted content of `line` if it carries a prefix.
    pub fn inner(line: &ContentLine, class: LineClass) -> Option<ContentLine> {
        match class {
            LineClass::Blockquote { marker_end } => Some(line.advance(marker_end)),
            _ => None,
        }
    }
}
