use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::blocks::{
    classify::{LineClass, classify},
    content::ContentLine,
};

use super::CodeFence;

/// Task checkbox syntax at the start of a list item's content.
pub struct TaskMarker;

fn task_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[([ xX])\](?:[ \t]|\r?$)").expect("valid regex"))
}

impl TaskMarker {
    pub const UNCHECKED: &'static str = "[ ]";
    pub const CHECKED: &'static str = "[x]";
    /// Byte length of the checkbox literal.
    pub const LEN: usize = 3;

    /// `Some(checked)` when `content` starts with a checkbox.
    pub fn parse(content: &str) -> Option<bool> {
        let caps = task_re().captures(content)?;
        Some(&caps[1] != " ")
    }

    /// The state of the checkbox literal `[ ]`, `[x]` or `[X]`.
    pub fn state(literal: &str) -> Option<bool> {
        match literal {
            "[ ]" => Some(false),
            "[x]" | "[X]" => Some(true),
            _ => None,
        }
    }
}

/// Tracks the lines collected into a list item to decide what may follow.
///
/// A line indented to the item's content column always belongs to it. A
/// less indented plain line belongs to it only as a lazy continuation of an
/// open paragraph, never inside a code fence.
#[derive(Debug, Default)]
pub struct ItemLines {
    pub lines: Vec<ContentLine>,
    fence: Option<CodeFence>,
    paragraph_open: bool,
}

impl ItemLines {
    pub fn push(&mut self, line: ContentLine) {
        self.observe(&line);
        self.lines.push(line);
    }

    /// Whether `line`, not indented enough to belong to the item, continues
    /// its last paragraph.
    pub fn accepts_lazy(&self, line: &ContentLine) -> bool {
        self.paragraph_open && self.fence.is_none() && classify(&line.trim_start()) == LineClass::Plain
    }

    fn observe(&mut self, line: &ContentLine) {
        if let Some(fence) = self.fence {
            if fence.closes(&line.text) {
                self.fence = None;
            }
            self.paragraph_open = false;
            return;
        }
        self.paragraph_open = match classify(line) {
            LineClass::Plain => true,
            LineClass::Fence { fence, len, .. } => {
                self.fence = Some(CodeFence {
                    fence,
                    len,
                    indent: 0,
                });
                false
            }
            LineClass::ListItem { marker_end, .. } => {
                // Only the nested item's own first line can open a paragraph.
                let inner = line.advance(marker_end);
                matches!(classify(&inner), LineClass::Plain)
            }
            LineClass::Blank
            | LineClass::ThematicBreak
            | LineClass::Heading { .. }
            | LineClass::Blockquote { .. } => false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("[ ] todo", Some(false))]
    #[case("[x] done", Some(true))]
    #[case("[X]", Some(true))]
    #[case("[x]\ttab", Some(true))]
    #[case("[x]done", None)]
    #[case("[y] no", None)]
    #[case(" [ ] indented", None)]
    fn parses_checkbox(#[case] content: &str, #[case] expected: Option<bool>) {
        assert_eq!(TaskMarker::parse(content), expected);
    }

    fn line(text: &str) -> ContentLine {
        ContentLine::new(0, 0, text)
    }

    #[test]
    fn lazy_line_after_paragraph() {
        let mut item = ItemLines::default();
        item.push(line("first"));
        assert!(item.accepts_lazy(&line("lazy")));
        assert!(!item.accepts_lazy(&line("- other")));
    }

    #[test]
    fn no_lazy_line_inside_fence() {
        let mut item = ItemLines::default();
        item.push(line("```"));
        item.push(line("code"));
        assert!(!item.accepts_lazy(&line("text")));
        item.push(line("```"));
        assert!(!item.accepts_lazy(&line("text")));
    }

    #[test]
    fn no_lazy_line_after_blank() {
        let mut item = ItemLines::default();
        item.push(line("para"));
        item.push(line(""));
        assert!(!item.accepts_lazy(&line("text")));
    }

    #[test]
    fn lazy_line_after_nested_item_text() {
        let mut item = ItemLines::default();
        item.push(line("- nested"));
        assert!(item.accepts_lazy(&line("more")));
    }
}
