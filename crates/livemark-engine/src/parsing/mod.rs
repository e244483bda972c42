pub mod blocks;
pub mod inline;
pub mod rope;
pub mod snapshot;
pub mod tokens;

#[cfg(test)]
mod tests;

use crate::{buffer::SourceBuffer, error::Diagnostic};

use blocks::{BlockNode, BlockParser};

/// One parse result: the top-level blocks of a buffer snapshot.
///
/// Trees are never mutated after construction. A new edit produces a new
/// tree, so the previous one stays valid for diffing and for readers on
/// other threads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentTree {
    pub blocks: Vec<BlockNode>,
    /// Line count of the buffer this tree was parsed from.
    pub line_count: usize,
    /// Constructs recovered by running them to the end of their container.
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentTree {
    /// The tree of the empty buffer.
    pub fn empty() -> Self {
        Self {
            blocks: vec![],
            line_count: 1,
            diagnostics: vec![],
        }
    }
}

/// Parses the whole buffer from scratch.
pub fn parse_document(buffer: &SourceBuffer) -> DocumentTree {
    let (blocks, diagnostics) = BlockParser::new(buffer).parse_all();
    DocumentTree {
        blocks,
        line_count: buffer.line_count(),
        diagnostics,
    }
}
