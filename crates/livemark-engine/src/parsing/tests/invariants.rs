use crate::{
    buffer::SourceBuffer,
    parsing::{
        DocumentTree,
        blocks::{BlockKind, BlockNode},
        parse_document,
        rope::SourceRange,
        snapshot,
    },
};

fn para(start: usize, end: usize) -> BlockNode {
    BlockNode::new(
        SourceRange::new(start, end),
        BlockKind::Paragraph { inlines: vec![] },
    )
}

#[test]
fn parsed_documents_hold_invariants() {
    for md in [
        "",
        "a\n\nb",
        "- a\n  - b\n\n    c\n- d",
        "> q\n> > r\n> - s",
        "```\nx\n\n```\n\n# h",
        "1. a\nlazy\n\n\n2. b",
        "- [ ] task\n  more\n\n  > q\n  >\n  > r",
        "> - a\n>\n>   b\n> c",
    ] {
        let buffer = SourceBuffer::from_text(md);
        snapshot::invariants(&buffer, &parse_document(&buffer));
    }
}

#[test]
#[should_panic(expected = "overlaps")]
fn overlapping_siblings_are_caught() {
    let buffer = SourceBuffer::from_text("a\nb\nc");
    let tree = DocumentTree {
        blocks: vec![para(0, 1), para(1, 2)],
        line_count: 3,
        diagnostics: vec![],
    };
    snapshot::invariants(&buffer, &tree);
}

#[test]
#[should_panic(expected = "escapes its parent")]
fn child_outside_parent_is_caught() {
    let buffer = SourceBuffer::from_text("> a\n> b\nc");
    let tree = DocumentTree {
        blocks: vec![BlockNode::new(
            SourceRange::new(0, 1),
            BlockKind::Blockquote {
                children: vec![para(1, 2)],
            },
        )],
        line_count: 3,
        diagnostics: vec![],
    };
    snapshot::invariants(&buffer, &tree);
}

#[test]
#[should_panic(expected = "not blank")]
fn uncovered_text_is_caught() {
    let buffer = SourceBuffer::from_text("a\nb");
    let tree = DocumentTree {
        blocks: vec![para(1, 1)],
        line_count: 2,
        diagnostics: vec![],
    };
    snapshot::invariants(&buffer, &tree);
}

#[test]
#[should_panic(expected = "not blank")]
fn quote_lines_dropped_by_child_are_caught() {
    let buffer = SourceBuffer::from_text("> a\n> b\n> c");
    let tree = DocumentTree {
        blocks: vec![BlockNode::new(
            SourceRange::new(0, 2),
            BlockKind::Blockquote {
                children: vec![para(0, 0)],
            },
        )],
        line_count: 3,
        diagnostics: vec![],
    };
    snapshot::invariants(&buffer, &tree);
}

#[test]
#[should_panic(expected = "line 3")]
fn item_lines_dropped_by_child_are_caught() {
    let buffer = SourceBuffer::from_text("- a\n  b\n\n  c");
    let mut tree = parse_document(&buffer);
    match &mut tree.blocks[0].kind {
        BlockKind::ListItem(item) => item.children.clear(),
        other => panic!("expected list item, got {other:?}"),
    }
    snapshot::invariants(&buffer, &tree);
}

#[test]
fn item_text_on_marker_line_needs_no_child() {
    let buffer = SourceBuffer::from_text("- a\n  b\n\n  c");
    let tree = parse_document(&buffer);
    assert_eq!(tree.blocks.len(), 1);
    assert_eq!(tree.blocks[0].children()[0].range, SourceRange::line(3));
    snapshot::invariants(&buffer, &tree);
}
