use crate::parsing::blocks::{classify::LineClass, types::ListMarker};

/// Paragraph continuation rules.
pub struct Paragraph;

impl Paragraph {
    /// Whether a line of class `class` continues an open paragraph.
    ///
    /// Markers interrupt a paragraph, except list items that cannot start a
    /// list there: empty items and ordered items not numbered 1.
    pub fn continues(class: LineClass) -> bool {
        match class {
            LineClass::Plain => true,
            LineClass::ListItem { empty: true, .. } => true,
            LineClass::ListItem {
                marker: ListMarker::Ordered { number, .. },
                ..
            } => number != 1,
            _ => false,
        }
    }
}
