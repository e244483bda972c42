use crate::parsing::tokens::{LineContext, MarkerKind, line_marker};

use super::{content::ContentLine, types::ListMarker};

/// Classification of a single line containing only local facts.
///
/// Each line is classified on its own from the marker it opens with; the
/// builder supplies the context (open paragraph, enclosing list item).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    ThematicBreak,
    Fence {
        fence: char,
        /// Length of the fence run.
        len: usize,
        /// Byte offset where the info string starts.
        marker_end: usize,
    },
    Heading {
        level: u8,
        marker_end: usize,
    },
    Blockquote {
        marker_end: usize,
    },
    ListItem {
        marker: ListMarker,
        /// Byte offset where item content starts on this line.
        marker_end: usize,
        /// Column continuation lines must reach to belong to the item.
        content_column: usize,
        /// Nothing follows the marker.
        empty: bool,
    },
    Plain,
}

/// Classifies a line in normal block context.
pub fn classify(line: &ContentLine) -> LineClass {
    if line.is_blank() {
        return LineClass::Blank;
    }
    let Some((kind, level, marker_end)) = line_marker(&line.text, LineContext::Normal) else {
        return LineClass::Plain;
    };
    match kind {
        MarkerKind::ThematicBreak => LineClass::ThematicBreak,
        MarkerKind::Fence { fence } => LineClass::Fence {
            fence,
            len: level,
            marker_end,
        },
        MarkerKind::Heading => LineClass::Heading {
            level: u8::try_from(level).unwrap_or(6),
            marker_end,
        },
        MarkerKind::Blockquote => LineClass::Blockquote { marker_end },
        MarkerKind::Bullet(c) => list_item(line, ListMarker::Bullet(c), marker_end, level),
        MarkerKind::Ordered { number, delimiter } => list_item(
            line,
            ListMarker::Ordered { number, delimiter },
            marker_end,
            level,
        ),
    }
}

fn list_item(
    line: &ContentLine,
    marker: ListMarker,
    marker_end: usize,
    content_column: usize,
) -> LineClass {
    LineClass::ListItem {
        marker,
        marker_end,
        content_column,
        empty: line.text[marker_end..].trim().is_empty(),
    }
}
