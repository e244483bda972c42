//! Reparse scoping.
//!
//! A node's extent depends on the lines it consumed plus, for some kinds,
//! lines past its end that the parser looked at before deciding it was
//! done. Its *horizon* is the last line it looked at:
//!
//! | Node | Horizon |
//! |------|---------|
//! | heading, thematic break, closed code block | its last line |
//! | paragraph, blockquote | the line after it |
//! | list item | the start of the next node (blank lines are skipped looking for indented content) |
//! | unclosed code block | end of buffer |
//!
//! Old nodes whose horizon lies before the edit are kept verbatim. Parsing
//! resumes right after the last kept node and stops as soon as it reaches
//! a line past the edit that the old parse also started from; the old
//! nodes from there on are reused with their ranges moved.

use log::debug;

use crate::{
    buffer::{LineChange, SourceBuffer},
    error::Diagnostic,
    parsing::{
        DocumentTree,
        blocks::{BlockKind, BlockNode, BlockParser},
        rope::SourceRange,
    },
};

/// A tree rebuilt from its predecessor after one buffer change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reparse {
    pub tree: DocumentTree,
    /// New-coordinate lines the parser actually read, if any.
    pub window: Option<SourceRange>,
}

/// Rebuilds `old` (the tree before `change`) against the edited `buffer`.
///
/// The result equals `parse_document(buffer)`.
pub fn reparse(old: &DocumentTree, buffer: &SourceBuffer, change: LineChange) -> Reparse {
    let count = buffer.line_count();
    let delta = change.delta();

    let kept = (0..old.blocks.len())
        .take_while(|&i| horizon(&old.blocks, i, old.line_count) < change.start)
        .count();
    let resume = kept
        .checked_sub(1)
        .map_or(0, |last| old.blocks[last].range.end + 1);

    let mut blocks: Vec<BlockNode> = old.blocks[..kept].to_vec();
    let mut diagnostics: Vec<Diagnostic> = old
        .diagnostics
        .iter()
        .copied()
        .filter(|d| d.line < resume)
        .collect();

    let mut parser = BlockParser::starting_at(buffer, resume);
    let mut window: Option<SourceRange> = None;
    loop {
        let at = parser.position();
        if let Some(old_at) = resync_point(old, change, at) {
            debug!(
                "reparse: lines {resume}..{at} resynced with old line {old_at} (delta {delta})"
            );
            diagnostics.extend(parser.take_diagnostics());
            blocks.extend(
                old.blocks
                    .iter()
                    .filter(|n| n.range.start >= old_at)
                    .map(|n| n.shifted(delta)),
            );
            diagnostics.extend(
                old.diagnostics
                    .iter()
                    .filter(|d| d.line >= old_at)
                    .map(|d| d.shifted(delta)),
            );
            break;
        }
        match parser.next_block() {
            Some(node) => {
                let start = window.map_or(node.range.start, |w| w.start);
                window = Some(SourceRange::new(start, node.range.end));
                blocks.push(node);
            }
            None => {
                debug!("reparse: lines {resume}..{count} parsed to end of buffer");
                diagnostics.extend(parser.take_diagnostics());
                break;
            }
        }
    }

    Reparse {
        tree: DocumentTree {
            blocks,
            line_count: count,
            diagnostics,
        },
        window,
    }
}

/// Last line the parser looked at when it built `blocks[index]`.
fn horizon(blocks: &[BlockNode], index: usize, line_count: usize) -> usize {
    let node = &blocks[index];
    match &node.kind {
        BlockKind::Heading { .. } | BlockKind::ThematicBreak => node.range.end,
        BlockKind::CodeBlock { closed: true, .. } => node.range.end,
        BlockKind::CodeBlock { closed: false, .. } => line_count,
        BlockKind::Paragraph { .. } | BlockKind::Blockquote { .. } => node.range.end + 1,
        BlockKind::ListItem(_) => blocks
            .get(index + 1)
            .map_or(line_count, |next| next.range.start),
    }
}

/// The old line matching new line `at`, when parsing from `at` is known
/// to reproduce the old nodes from there on.
///
/// That holds once `at` is past every edited line and its old counterpart
/// does not fall strictly inside an old node: the old parser then either
/// started a node there or was skipping blank lines towards one.
fn resync_point(old: &DocumentTree, change: LineChange, at: usize) -> Option<usize> {
    if at < change.new_end {
        return None;
    }
    let old_at = at.checked_add_signed(-change.delta())?;
    let inside = old
        .blocks
        .iter()
        .any(|n| n.range.start < old_at && old_at <= n.range.end);
    (!inside).then_some(old_at)
}
