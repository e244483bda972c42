//! # Source Buffer
//!
//! The engine reads markdown from an immutable [`SourceBuffer`] snapshot and
//! changes it only through [`EditDescriptor`]s, the same shape whether the edit
//! came from a keystroke, a task toggle or opening a file.
//!
//! The buffer is an `xi_rope::Rope` viewed as lines split on `\n`. It always has
//! at least one line: the empty buffer is a single empty line.

use std::ops::Range;

use xi_rope::{LinesMetric, Rope};

use crate::{
    error::EngineError,
    parsing::{
        blocks::ContentLine,
        rope::{LineSource, slice_to_string, split_lines},
    },
};

/// Replace the half-open line range `lines` with `new_lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDescriptor {
    /// Lines of the current buffer being replaced. `start == end` inserts.
    pub lines: Range<usize>,
    /// Replacement lines. An entry containing `\n` is split into several.
    pub new_lines: Vec<String>,
}

impl EditDescriptor {
    pub fn new(lines: Range<usize>, new_lines: Vec<String>) -> Self {
        Self { lines, new_lines }
    }

    /// Replace a single line.
    pub fn replace_line(line: usize, text: impl Into<String>) -> Self {
        Self::new(line..line + 1, vec![text.into()])
    }

    /// The full-buffer edit used to ingest a whole document.
    ///
    /// `line_count` is the current buffer's line count; pass
    /// [`SourceBuffer::line_count`].
    pub fn replace_all(line_count: usize, text: &str) -> Self {
        Self::new(0..line_count, split_lines(text).map(str::to_string).collect())
    }
}

/// A line-level change in buffer coordinates: old lines `start..old_end`
/// became new lines `start..new_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChange {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

impl LineChange {
    /// Net change in line count.
    #[must_use]
    pub fn delta(self) -> isize {
        self.new_end as isize - self.old_end as isize
    }

    /// Composes `self` followed by `next` (expressed in the coordinates left
    /// behind by `self`) into one change against the original buffer.
    #[must_use]
    pub fn then(self, next: LineChange) -> LineChange {
        let start = self.start.min(next.start);
        let old_end = (self.old_end as isize).max(next.old_end as isize - self.delta());
        let new_end = (self.new_end as isize + next.delta()).max(next.new_end as isize);
        LineChange {
            start,
            old_end: old_end.max(start as isize) as usize,
            new_end: new_end.max(start as isize) as usize,
        }
    }
}

/// An immutable-by-default view of the markdown text as lines.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    rope: Rope,
}

impl Default for SourceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::from(""),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    pub fn line_count(&self) -> usize {
        self.rope.measure::<LinesMetric>() + 1
    }

    /// The text of line `index` without its newline.
    ///
    /// # Panics
    /// Panics when `index >= line_count()`.
    pub fn line(&self, index: usize) -> String {
        let count = self.line_count();
        assert!(index < count, "line {index} out of range ({count} lines)");
        let start = self.rope.offset_of_line(index);
        let end = if index + 1 == count {
            self.rope.len()
        } else {
            self.rope.offset_of_line(index + 1) - 1
        };
        slice_to_string(&self.rope, start, end)
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).map(move |i| self.line(i))
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Applies `edit`, returning the line-level change it made.
    ///
    /// The buffer is left untouched when the range is out of bounds.
    pub fn edit(&mut self, edit: &EditDescriptor) -> Result<LineChange, EngineError> {
        let count = self.line_count();
        let Range { start, end } = edit.lines;
        if start > end || end > count {
            return Err(EngineError::MalformedEditRange {
                start,
                end,
                line_count: count,
            });
        }

        // An entry holding `\n` counts as the lines it spells out.
        let new_lines: Vec<&str> = edit.new_lines.iter().flat_map(|l| split_lines(l)).collect();
        let joined = new_lines.join("\n");
        let len = self.rope.len();
        let (bytes, text) = if end < count {
            // Ends before the last line: every replaced line owns its newline.
            let text = if new_lines.is_empty() {
                String::new()
            } else {
                joined + "\n"
            };
            (self.rope.offset_of_line(start)..self.rope.offset_of_line(end), text)
        } else if start < count {
            // Runs through the last line.
            if !new_lines.is_empty() {
                (self.rope.offset_of_line(start)..len, joined)
            } else if start == 0 {
                (0..len, String::new())
            } else {
                // Drop the newline that ended the line before `start`.
                (self.rope.offset_of_line(start) - 1..len, String::new())
            }
        } else if new_lines.is_empty() {
            (len..len, String::new())
        } else {
            // Append after the last line.
            (len..len, format!("\n{joined}"))
        };

        if !(bytes.is_empty() && text.is_empty()) {
            self.rope.edit(bytes, text);
        }

        // Deleting every line leaves one empty line behind.
        let new_end = if start == 0 && end == count && new_lines.is_empty() {
            1
        } else {
            start + new_lines.len()
        };
        Ok(LineChange {
            start,
            old_end: end,
            new_end,
        })
    }
}

impl LineSource for SourceBuffer {
    fn line_count(&self) -> usize {
        SourceBuffer::line_count(self)
    }

    fn content_line(&self, index: usize) -> ContentLine {
        ContentLine::new(index, 0, self.line(index))
    }
}
