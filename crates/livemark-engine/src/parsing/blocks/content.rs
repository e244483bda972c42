//! Lines as the block parser sees them once container prefixes are stripped.

/// Width of one tab stop in columns.
pub const TAB_STOP: usize = 4;

/// The column reached after `ch` when starting at `column`.
pub fn advance_column(column: usize, ch: char) -> usize {
    if ch == '\t' {
        column + TAB_STOP - column % TAB_STOP
    } else {
        column + 1
    }
}

/// One source line after any enclosing container prefixes (`> `, list
/// item indentation) have been removed.
///
/// `text` is always a suffix of the source line, and `column` is the byte
/// offset where it starts, so offsets within `text` map back to exact
/// source positions.
///
/// # Invariants
///
/// - `column + text.len()` equals the source line's length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Zero-based source line number.
    pub line: usize,
    /// Byte offset of `text` within the source line.
    pub column: usize,
    pub text: String,
}

impl ContentLine {
    pub fn new(line: usize, column: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            text: text.into(),
        }
    }

    /// Whitespace only (a trailing `\r` counts as whitespace).
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Leading whitespace width in columns, counted from the start of `text`.
    pub fn indent(&self) -> usize {
        self.text
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .fold(0, advance_column)
    }

    /// Drops the first `bytes` bytes.
    #[must_use]
    pub fn advance(&self, bytes: usize) -> ContentLine {
        let bytes = bytes.min(self.text.len());
        ContentLine::new(self.line, self.column + bytes, &self.text[bytes..])
    }

    /// Drops up to `columns` columns of leading whitespace.
    ///
    /// A tab straddling the limit is consumed whole.
    #[must_use]
    pub fn strip_indent(&self, columns: usize) -> ContentLine {
        let mut col = 0;
        let mut bytes = 0;
        for ch in self.text.chars() {
            if col >= columns || !(ch == ' ' || ch == '\t') {
                break;
            }
            col = advance_column(col, ch);
            bytes += ch.len_utf8();
        }
        self.advance(bytes)
    }

    /// Drops all leading whitespace.
    #[must_use]
    pub fn trim_start(&self) -> ContentLine {
        let trimmed = self.text.trim_start_matches([' ', '\t']);
        self.advance(self.text.len() - trimmed.len())
    }
}
