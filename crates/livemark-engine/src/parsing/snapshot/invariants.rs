use std::iter;

use crate::{
    buffer::SourceBuffer,
    parsing::{
        DocumentTree,
        blocks::{
            BlockKind, BlockNode, ContentLine, LineClass, ListItem, classify,
            kinds::{BlockQuote, TaskMarker},
        },
        rope::{LineSource, SourceRange},
    },
};

/// Panics with a description when `tree` breaks a structural invariant
/// against the buffer it was parsed from.
///
/// - every range lies inside the buffer
/// - siblings are ordered and disjoint
/// - children lie inside their parent
/// - lines a container covers but none of its children do are blank once
///   the container's prefix (`>`, item indentation) is stripped; a list
///   item's own text on its marker line is the exception
pub fn check(buffer: &SourceBuffer, tree: &DocumentTree) {
    let count = buffer.line_count();
    assert_eq!(
        tree.line_count, count,
        "tree line count {} does not match buffer ({count} lines)",
        tree.line_count
    );
    check_level(buffer, 0, &tree.blocks, SourceRange::new(0, count - 1), 0);
}

/// `source` holds the lines of `parent` with its prefixes stripped; source
/// line `n` sits at local index `n - base`. The first `own_lines` lines of
/// `parent` are text the parent renders itself.
fn check_level<S: LineSource + ?Sized>(
    source: &S,
    base: usize,
    blocks: &[BlockNode],
    parent: SourceRange,
    own_lines: usize,
) {
    let mut previous: Option<SourceRange> = None;
    let mut next = parent.start + own_lines;
    for block in blocks {
        let r = block.range;
        assert!(
            r.start <= r.end,
            "inverted range {r} on {}",
            block.tag()
        );
        assert!(
            parent.start <= r.start && r.end <= parent.end,
            "{} {r} escapes its parent {parent}",
            block.tag()
        );
        if let Some(prev) = previous {
            assert!(
                prev.end < r.start,
                "sibling {} {r} overlaps or precedes {prev}",
                block.tag()
            );
        }
        previous = Some(r);

        assert_blank(source, base, next..r.start, parent);
        next = r.end + 1;

        match &block.kind {
            BlockKind::Blockquote { children } => {
                let inner = quoted_lines(source, base, r);
                check_level(&inner, r.start, children, r, 0);
            }
            BlockKind::ListItem(item) => {
                let inner = item_lines(source, base, r, item);
                let own = own_text_lines(&inner, item);
                check_level(&inner, r.start, &item.children, r, own);
            }
            _ => {}
        }
    }
    assert_blank(source, base, next..parent.end + 1, parent);
}

fn assert_blank<S: LineSource + ?Sized>(
    source: &S,
    base: usize,
    lines: std::ops::Range<usize>,
    parent: SourceRange,
) {
    for line in lines {
        let content = source.content_line(line - base);
        assert!(
            content.is_blank(),
            "line {line} in {parent} belongs to no block but is not blank: {:?}",
            content.text
        );
    }
}

fn quoted_lines<S: LineSource + ?Sized>(source: &S, base: usize, r: SourceRange) -> Vec<ContentLine> {
    (r.start..=r.end)
        .map(|line| {
            let content = source.content_line(line - base);
            BlockQuote::inner(&content, classify(&content))
                .unwrap_or_else(|| panic!("blockquote {r} spans unquoted line {line}"))
        })
        .collect()
}

fn item_lines<S: LineSource + ?Sized>(
    source: &S,
    base: usize,
    r: SourceRange,
    item: &ListItem,
) -> Vec<ContentLine> {
    let first = source.content_line(r.start - base);
    let LineClass::ListItem {
        marker_end,
        content_column,
        ..
    } = classify(&first)
    else {
        panic!("list item {r} does not open with a list marker: {:?}", first.text)
    };
    let mut content = first.advance(marker_end);
    if item.checked.is_some() {
        content = content.advance(TaskMarker::LEN);
    }
    let rest = (r.start + 1..=r.end).map(|line| {
        let line = source.content_line(line - base);
        if line.is_blank() || line.indent() >= content_column {
            line.strip_indent(content_column)
        } else {
            line.trim_start()
        }
    });
    iter::once(content).chain(rest).collect()
}

/// Lines of the item's leading paragraph, which the item keeps as its own
/// inlines instead of a child.
fn own_text_lines(inner: &[ContentLine], item: &ListItem) -> usize {
    if item.inlines.is_empty() {
        return 0;
    }
    let limit = item
        .children
        .first()
        .map_or(inner.len(), |child| child.range.start.saturating_sub(inner[0].line));
    inner[..limit.min(inner.len())]
        .iter()
        .take_while(|line| !line.is_blank())
        .count()
}
