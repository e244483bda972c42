//! # Task-List Bridge
//!
//! Nodes are rebuilt on every parse, so a rendered checkbox is identified by
//! where it came from: the marker line, the byte column of its `[`, and the
//! text that line had when the tree was built. A toggle is only honoured
//! while the buffer still agrees with all three and the tree parsed from
//! that buffer still has a task item there. Unchanged text can change
//! meaning: a fence opened above the item turns it into code.

use crate::{
    buffer::{EditDescriptor, SourceBuffer},
    error::EngineError,
    parsing::{
        DocumentTree,
        blocks::{BlockKind, BlockNode, kinds::TaskMarker},
        inline::plain_text,
        rope::SourceRange,
    },
};

/// Identity of a rendered task item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId {
    /// Range of the list item node when it was rendered.
    pub range: SourceRange,
    /// Byte column of the checkbox's `[` on the marker line.
    pub column: usize,
    /// The marker line as it read when the item was rendered.
    pub line_text: String,
}

impl TaskId {
    /// The marker line.
    pub fn line(&self) -> usize {
        self.range.start
    }
}

/// A task item as listed for the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: TaskId,
    pub checked: bool,
    /// Visible text of the item's own line.
    pub label: String,
}

/// Every task item of `tree`, in document order.
///
/// `buffer` must be the snapshot `tree` was parsed from.
pub fn collect(tree: &DocumentTree, buffer: &SourceBuffer) -> Vec<TaskItem> {
    let mut out = vec![];
    collect_blocks(&tree.blocks, buffer, &mut out);
    out
}

fn collect_blocks(blocks: &[BlockNode], buffer: &SourceBuffer, out: &mut Vec<TaskItem>) {
    for block in blocks {
        if let BlockKind::ListItem(item) = &block.kind {
            if let (Some(checked), Some(column)) = (item.checked, item.checkbox_column) {
                out.push(TaskItem {
                    id: TaskId {
                        range: block.range,
                        column,
                        line_text: buffer.line(block.range.start),
                    },
                    checked,
                    label: plain_text(&item.inlines),
                });
            }
        }
        collect_blocks(block.children(), buffer, out);
    }
}

/// The single-line edit flipping the checkbox `id` points at.
///
/// `tree` must be parsed from `buffer`. Fails with
/// [`EngineError::StaleReference`] when the marker line is gone, reads
/// differently than it did when `id` was taken, or no longer holds a task
/// item in `tree`.
pub fn toggle(
    tree: &DocumentTree,
    buffer: &SourceBuffer,
    id: &TaskId,
) -> Result<EditDescriptor, EngineError> {
    let line = id.line();
    let stale = EngineError::StaleReference { line };
    if line >= buffer.line_count() {
        return Err(stale);
    }
    let text = buffer.line(line);
    if text != id.line_text || !has_task_at(&tree.blocks, line, id.column) {
        return Err(stale);
    }
    let literal = text
        .get(id.column..id.column + TaskMarker::LEN)
        .ok_or(stale.clone())?;
    let checked = TaskMarker::state(literal).ok_or(stale)?;

    let flipped = if checked {
        TaskMarker::UNCHECKED
    } else {
        TaskMarker::CHECKED
    };
    let mut new_text = String::with_capacity(text.len());
    new_text.push_str(&text[..id.column]);
    new_text.push_str(flipped);
    new_text.push_str(&text[id.column + TaskMarker::LEN..]);
    Ok(EditDescriptor::replace_line(line, new_text))
}

fn has_task_at(blocks: &[BlockNode], line: usize, column: usize) -> bool {
    blocks
        .iter()
        .take_while(|block| block.range.start <= line)
        .filter(|block| block.range.contains(line))
        .any(|block| match &block.kind {
            BlockKind::ListItem(item)
                if block.range.start == line && item.checkbox_column == Some(column) =>
            {
                item.checked.is_some()
            }
            _ => has_task_at(block.children(), line, column),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn tasks(text: &str) -> (SourceBuffer, Vec<TaskItem>) {
        let buffer = SourceBuffer::from_text(text);
        let items = collect(&parse_document(&buffer), &buffer);
        (buffer, items)
    }

    fn toggle_in(buffer: &SourceBuffer, id: &TaskId) -> Result<EditDescriptor, EngineError> {
        toggle(&parse_document(buffer), buffer, id)
    }

    #[test]
    fn buy_milk_toggles_on() {
        let (buffer, items) = tasks("- [ ] buy milk");
        assert_eq!(items.len(), 1);
        assert!(!items[0].checked);
        assert_eq!(items[0].label, "buy milk");
        assert_eq!(
            toggle_in(&buffer, &items[0].id).unwrap(),
            EditDescriptor::replace_line(0, "- [x] buy milk")
        );
    }

    #[rstest]
    #[case("- [x] done", "- [ ] done")]
    #[case("* [X] shout", "* [ ] shout")]
    #[case("12. [ ] numbered", "12. [x] numbered")]
    #[case("-   [ ] wide gap  [ ] ", "-   [x] wide gap  [ ] ")]
    #[case("- [ ]", "- [x]")]
    fn toggle_flips_only_the_checkbox(#[case] line: &str, #[case] expected: &str) {
        let (buffer, items) = tasks(line);
        let edit = toggle_in(&buffer, &items[0].id).unwrap();
        assert_eq!(edit.new_lines, vec![expected.to_string()]);
    }

    #[test]
    fn nested_tasks_are_found_in_order() {
        let (_, items) = tasks("> - [ ] quoted\n\n- parent\n  - [x] child");
        let lines: Vec<_> = items.iter().map(|t| (t.id.line(), t.id.column)).collect();
        assert_eq!(lines, vec![(0, 4), (3, 4)]);
    }

    #[test]
    fn plain_list_items_are_not_tasks() {
        assert!(tasks("- [link](x)\n- []\n- [ ]x").1.is_empty());
    }

    #[test]
    fn edited_line_makes_id_stale() {
        let (mut buffer, items) = tasks("- [ ] a\n- [ ] b");
        buffer
            .edit(&EditDescriptor::replace_line(1, "- [ ] bb"))
            .unwrap();
        assert_eq!(
            toggle_in(&buffer, &items[1].id),
            Err(EngineError::StaleReference { line: 1 })
        );
        assert!(toggle_in(&buffer, &items[0].id).is_ok());
    }

    #[test]
    fn fence_opened_above_makes_id_stale() {
        let (mut buffer, items) = tasks("intro\n\n- [ ] a\n\n```");
        buffer
            .edit(&EditDescriptor::replace_line(1, "```"))
            .unwrap();
        assert_eq!(buffer.line(2), items[0].id.line_text);
        assert_eq!(
            toggle_in(&buffer, &items[0].id),
            Err(EngineError::StaleReference { line: 2 })
        );
    }

    #[test]
    fn removed_line_makes_id_stale() {
        let (mut buffer, items) = tasks("x\n\n- [ ] a");
        buffer.edit(&EditDescriptor::new(0..3, vec![])).unwrap();
        assert!(matches!(
            toggle_in(&buffer, &items[0].id),
            Err(EngineError::StaleReference { line: 2 })
        ));
    }
}
