use crate::parsing::blocks::ContentLine;

/// Random access to the lines a block parser consumes.
///
/// The top level reads straight from the source buffer; nested containers
/// (blockquotes, list items) hand their stripped lines to a recursive parse
/// as a plain slice.
pub trait LineSource {
    /// Number of lines available.
    fn line_count(&self) -> usize;

    /// The line at `index`, local to this source. Panics when out of range.
    fn content_line(&self, index: usize) -> ContentLine;
}

impl LineSource for [ContentLine] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn content_line(&self, index: usize) -> ContentLine {
        self[index].clone()
    }
}

impl LineSource for Vec<ContentLine> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn content_line(&self, index: usize) -> ContentLine {
        self[index].clone()
    }
}

/// Splits text into lines on `\n`.
///
/// Always yields at least one (possibly empty) line, so `"a\n"` is two lines.
/// A `\r` before the newline stays on its line; the classifier ignores it.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split('\n')
}
