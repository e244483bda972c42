use std::fmt::Write;

use crate::parsing::{
    DocumentTree,
    blocks::{BlockKind, BlockNode, ListMarker},
    inline::{InlineSpan, Strength},
    rope::preview,
};

/// One line per block, children indented by two spaces.
///
/// ```text
/// heading 0..=0 h2 "Title"
/// list-item 2..=3 - [x] "done"
///   paragraph 3..=3 "more"
/// ```
pub fn format_tree(tree: &DocumentTree) -> String {
    let mut out = String::new();
    for block in &tree.blocks {
        write_block(&mut out, block, 0);
    }
    for diagnostic in &tree.diagnostics {
        let _ = writeln!(out, "! {diagnostic}");
    }
    out
}

fn write_block(out: &mut String, block: &BlockNode, depth: usize) {
    let _ = write!(out, "{:indent$}{} {}", "", block.tag(), block.range, indent = depth * 2);
    match &block.kind {
        BlockKind::Heading { level, .. } => {
            let _ = write!(out, " h{level}");
        }
        BlockKind::ListItem(item) => {
            match item.marker {
                ListMarker::Bullet(c) => {
                    let _ = write!(out, " {c}");
                }
                ListMarker::Ordered { number, delimiter } => {
                    let _ = write!(out, " {number}{delimiter}");
                }
            }
            match item.checked {
                Some(true) => out.push_str(" [x]"),
                Some(false) => out.push_str(" [ ]"),
                None => {}
            }
        }
        BlockKind::CodeBlock {
            language,
            lines,
            closed,
        } => {
            let _ = write!(
                out,
                " {} lines={}{}",
                language.as_deref().unwrap_or("-"),
                lines.len(),
                if *closed { "" } else { " unclosed" }
            );
        }
        BlockKind::Paragraph { .. } | BlockKind::Blockquote { .. } | BlockKind::ThematicBreak => {}
    }
    let inlines = block.inlines();
    if !inlines.is_empty() {
        let _ = write!(out, " {:?}", preview(&format_inlines(inlines), 60));
    }
    out.push('\n');
    for child in block.children() {
        write_block(out, child, depth + 1);
    }
}

/// Compact bracket notation: `strong[bold em[it]] code[x] link<t>[text]`.
pub fn format_inlines(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            InlineSpan::Text(t) => out.push_str(t),
            InlineSpan::LineBreak => out.push('⏎'),
            InlineSpan::Emphasis { strength, children } => {
                let tag = match strength {
                    Strength::Regular => "em",
                    Strength::Strong => "strong",
                };
                let _ = write!(out, "{tag}[{}]", format_inlines(children));
            }
            InlineSpan::Strikethrough(children) => {
                let _ = write!(out, "del[{}]", format_inlines(children));
            }
            InlineSpan::CodeSpan { raw } => {
                let _ = write!(out, "code[{raw}]");
            }
            InlineSpan::Link { target, children } => {
                let _ = write!(out, "link<{target}>[{}]", format_inlines(children));
            }
            InlineSpan::Image { target, alt } => {
                let _ = write!(out, "img<{target}>[{alt}]");
            }
        }
    }
    out
}
