//! Integration tests for the parsing module.
//!
//! Outlines are compared with inline `insta` snapshots; every parsed tree is
//! also run through the invariant checker.

mod invariants;

use crate::{
    buffer::SourceBuffer,
    parsing::{
        blocks::BlockKind,
        inline::{InlineSpan, Strength},
        parse_document, snapshot,
    },
};

fn outline(md: &str) -> String {
    let buffer = SourceBuffer::from_text(md);
    let tree = parse_document(&buffer);
    snapshot::invariants(&buffer, &tree);
    snapshot::format_tree(&tree).trim_end().to_string()
}

#[test]
fn mixed_document_outline() {
    let md = "# Title\n\nSome **bold** text\nand `code`.\n\n- [ ] buy milk\n- [x] eggs\n  > note\n\n```rust\nfn main() {}\n```\n---";
    insta::assert_snapshot!(outline(md), @r#"
    heading 0..=0 h1 "Title"
    paragraph 2..=3 "Some strong[bold] text⏎and code[code]."
    list-item 5..=5 - [ ] "buy milk"
    list-item 6..=7 - [x] "eggs"
      blockquote 7..=7
        paragraph 7..=7 "note"
    code-block 9..=11 rust lines=1
    thematic-break 12..=12
    "#);
}

#[test]
fn recovered_constructs_outline() {
    let md = "see [docs](http://x\n\n~~~\nstill code";
    insta::assert_snapshot!(outline(md), @r#"
    paragraph 0..=0 "see [docs](http://x"
    code-block 2..=3 - lines=1 unclosed
    ! line 1: unterminated link
    ! line 3: unterminated code fence
    "#);
}

#[test]
fn ordered_list_outline() {
    let md = "3. three\n4. four\n   1) nested";
    insta::assert_snapshot!(outline(md), @r#"
    list-item 0..=0 3. "three"
    list-item 1..=2 4. "four"
      list-item 2..=2 1) "nested"
    "#);
}

#[test]
fn scenario_task_item() {
    let tree = parse_document(&SourceBuffer::from_text("- [ ] buy milk"));
    assert_eq!(tree.blocks.len(), 1);
    let BlockKind::ListItem(item) = &tree.blocks[0].kind else {
        panic!("expected a list item: {:?}", tree.blocks[0]);
    };
    assert_eq!(item.checked, Some(false));
    assert_eq!(item.inlines, vec![InlineSpan::text("buy milk")]);
}

#[test]
fn scenario_bold_and_italic() {
    let tree = parse_document(&SourceBuffer::from_text("**bold _and italic_**"));
    assert_eq!(
        tree.blocks[0].inlines(),
        &[InlineSpan::Emphasis {
            strength: Strength::Strong,
            children: vec![
                InlineSpan::text("bold "),
                InlineSpan::Emphasis {
                    strength: Strength::Regular,
                    children: vec![InlineSpan::text("and italic")],
                },
            ],
        }]
    );
}

#[test]
fn scenario_fence_opened_on_last_line() {
    let buffer = SourceBuffer::from_text("para\n\n```");
    let tree = parse_document(&buffer);
    let last = tree.blocks.last().expect("a code block");
    assert_eq!(last.range.end, buffer.line_count() - 1);
    assert!(matches!(last.kind, BlockKind::CodeBlock { closed: false, .. }));
}

/// Code spans are raw zones: no emphasis or links inside.
#[test]
fn raw_zones_suppress_inline_parsing() {
    let tree = parse_document(&SourceBuffer::from_text("`[a](b) *c*`"));
    assert_eq!(
        tree.blocks[0].inlines(),
        &[InlineSpan::CodeSpan {
            raw: "[a](b) *c*".into()
        }]
    );
}

#[test]
fn unclosed_constructs_become_text() {
    let tree = parse_document(&SourceBuffer::from_text("[unclosed and `also unclosed"));
    assert_eq!(
        tree.blocks[0].inlines(),
        &[InlineSpan::text("[unclosed and `also unclosed")]
    );
}

#[test]
fn empty_document() {
    let tree = parse_document(&SourceBuffer::new());
    assert!(tree.blocks.is_empty());
    assert_eq!(tree.line_count, 1);
}

#[test]
fn blank_lines_only() {
    let tree = parse_document(&SourceBuffer::from_text("\n\n\n"));
    assert!(tree.blocks.is_empty());
}
