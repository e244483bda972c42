use crate::parsing::{
    DocumentTree,
    blocks::{BlockKind, BlockNode},
};

/// One step of a [`RenderDiff`].
///
/// Positions index the sequence as already mutated by the ops before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    Insert {
        position: usize,
        node: BlockNode,
    },
    Remove {
        position: usize,
    },
    Replace {
        position: usize,
        node: BlockNode,
        /// Child-level diff when old and new are containers of the same kind.
        nested: Option<RenderDiff>,
    },
}

/// Unchanged trailing nodes whose source lines moved.
///
/// Every node at a new position `>= from` equals the old node at the
/// matching position with its range moved by `delta` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineShift {
    pub from: usize,
    pub delta: isize,
}

/// Edit script turning one node sequence into another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderDiff {
    pub ops: Vec<DiffOp>,
    pub shift: LineShift,
}

impl RenderDiff {
    /// No op and no moved lines: the preview needs no update.
    pub fn is_noop(&self) -> bool {
        self.ops.is_empty() && self.shift.delta == 0
    }

    /// Plays the diff over `old`, yielding the new sequence.
    pub fn apply(&self, old: &[BlockNode]) -> Vec<BlockNode> {
        let mut blocks = old.to_vec();
        for op in &self.ops {
            match op {
                DiffOp::Insert { position, node } => blocks.insert(*position, node.clone()),
                DiffOp::Remove { position } => {
                    blocks.remove(*position);
                }
                DiffOp::Replace { position, node, .. } => blocks[*position] = node.clone(),
            }
        }
        if self.shift.delta != 0 {
            for node in blocks.iter_mut().skip(self.shift.from) {
                *node = node.shifted(self.shift.delta);
            }
        }
        blocks
    }
}

/// Diffs two trees of the same buffer at successive generations.
pub fn diff_trees(old: &DocumentTree, new: &DocumentTree) -> RenderDiff {
    let delta = new.line_count as isize - old.line_count as isize;
    diff_blocks(&old.blocks, &new.blocks, delta)
}

/// Structural diff of two sibling sequences.
///
/// The longest equal prefix and the longest suffix equal after moving by
/// `delta` lines are left alone; the rest pairs up into replacements, and
/// whatever is left over at the end of the changed window is inserted or
/// removed.
pub fn diff_blocks(old: &[BlockNode], new: &[BlockNode], delta: isize) -> RenderDiff {
    let prefix = old
        .iter()
        .zip(new)
        .take_while(|(a, b)| a == b)
        .count();
    let room = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(room)
        .take_while(|(a, b)| a.range.shifted(delta) == b.range && a.shifted(delta) == **b)
        .count();

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];
    let paired = old_mid.len().min(new_mid.len());

    let mut ops = Vec::with_capacity(old_mid.len().max(new_mid.len()));
    for (i, (before, after)) in old_mid.iter().zip(new_mid).enumerate() {
        ops.push(DiffOp::Replace {
            position: prefix + i,
            node: after.clone(),
            nested: nested_diff(before, after, delta),
        });
    }
    for (i, node) in new_mid[paired..].iter().enumerate() {
        ops.push(DiffOp::Insert {
            position: prefix + paired + i,
            node: node.clone(),
        });
    }
    for _ in paired..old_mid.len() {
        ops.push(DiffOp::Remove {
            position: prefix + paired,
        });
    }

    RenderDiff {
        ops,
        shift: LineShift {
            from: new.len() - suffix,
            delta,
        },
    }
}

fn nested_diff(old: &BlockNode, new: &BlockNode, delta: isize) -> Option<RenderDiff> {
    match (&old.kind, &new.kind) {
        (BlockKind::Blockquote { .. }, BlockKind::Blockquote { .. })
        | (BlockKind::ListItem(_), BlockKind::ListItem(_)) => {
            Some(diff_blocks(old.children(), new.children(), delta))
        }
        _ => None,
    }
}
