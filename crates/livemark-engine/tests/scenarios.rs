use livemark_engine::{
    BlockKind, DiffOp, EditDescriptor, InlineSpan, Session, SourceBuffer, SourceRange, Strength,
    parsing::parse_document,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn open(text: &str) -> Session {
    let mut session = Session::new();
    let edit = EditDescriptor::replace_all(session.buffer().line_count(), text);
    session.apply_edit(edit).unwrap();
    session
}

#[test]
fn buy_milk_task_toggles() {
    let session = open("- [ ] buy milk");
    let tree = session.tree();
    assert_eq!(tree.blocks.len(), 1);
    let BlockKind::ListItem(item) = &tree.blocks[0].kind else {
        panic!("expected a list item, got {:?}", tree.blocks[0]);
    };
    assert_eq!(item.checked, Some(false));

    let tasks = session.task_items();
    let edit = session.toggle(&tasks[0].id).unwrap();
    assert_eq!(edit, EditDescriptor::replace_line(0, "- [x] buy milk"));
}

#[test]
fn bold_wrapping_italic() {
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

/// 25 three-line paragraphs, each followed by a blank line.
fn hundred_lines() -> String {
    let mut lines = vec![];
    for k in 0..25 {
        lines.push(format!("paragraph {k} starts here"));
        lines.push(format!("paragraph {k} goes on"));
        lines.push(format!("paragraph {k} ends"));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[test]
fn editing_line_five_of_a_hundred_replaces_one_node() {
    let mut session = open(&hundred_lines());
    assert_eq!(session.buffer().line_count(), 100);

    let update = session
        .apply_edit(EditDescriptor::replace_line(5, "paragraph 1 was edited"))
        .unwrap();
    assert_eq!(update.reparsed, Some(SourceRange::new(4, 6)));
    assert_eq!(update.diff.ops.len(), 1);
    assert!(matches!(update.diff.ops[0], DiffOp::Replace { position: 1, .. }));
    assert_eq!(update.diff.shift.delta, 0);
}

#[test]
fn fence_opened_on_last_line_is_recovered() {
    let mut session = open("text\n\nmore");
    let update = session
        .apply_edit(EditDescriptor::new(3..3, vec!["```".into()]))
        .unwrap();
    let last = update.tree.blocks.last().unwrap();
    assert_eq!(last.range, SourceRange::line(3));
    assert!(matches!(last.kind, BlockKind::CodeBlock { closed: false, .. }));
    assert_eq!(update.tree.diagnostics.len(), 1);
}

#[rstest]
#[case("- [ ] a\n- [x] b\n\ntext", 0)]
#[case("- [ ] a\n- [x] b\n\ntext", 1)]
#[case("> 1. [ ] quoted\n> 2. [X] also", 1)]
#[case("- parent\n  - [ ] child  [x] not a box", 0)]
fn toggling_changes_one_run_on_one_line(#[case] text: &str, #[case] index: usize) {
    let mut session = open(text);
    let before: Vec<String> = session.buffer().lines().collect();
    let id = session.task_items()[index].id.clone();
    session.apply_toggle(&id).unwrap();
    let after: Vec<String> = session.buffer().lines().collect();

    assert_eq!(before.len(), after.len());
    for (i, (old, new)) in before.iter().zip(&after).enumerate() {
        if i != id.line() {
            assert_eq!(old, new);
            continue;
        }
        let changed: Vec<usize> = old
            .bytes()
            .zip(new.bytes())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(at, _)| at)
            .collect();
        assert_eq!(changed, vec![id.column + 1]);
        assert_eq!(old.len(), new.len());
    }
}
