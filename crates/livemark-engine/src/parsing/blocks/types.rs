use crate::parsing::{inline::InlineSpan, rope::SourceRange};

/// The marker that opened a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListMarker {
    /// `-`, `*` or `+`.
    Bullet(char),
    /// `1.` or `1)`; `number` is the literal start number.
    Ordered { number: u64, delimiter: char },
}

impl ListMarker {
    pub fn is_ordered(&self) -> bool {
        matches!(self, ListMarker::Ordered { .. })
    }

    /// Whether two markers belong to the same list when adjacent.
    pub fn same_list(&self, other: &ListMarker) -> bool {
        match (self, other) {
            (ListMarker::Bullet(a), ListMarker::Bullet(b)) => a == b,
            (
                ListMarker::Ordered { delimiter: a, .. },
                ListMarker::Ordered { delimiter: b, .. },
            ) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub marker: ListMarker,
    /// `Some` for task items: `[ ]` is `false`, `[x]` / `[X]` is `true`.
    pub checked: Option<bool>,
    /// Byte column of the checkbox's `[` on the marker line.
    pub checkbox_column: Option<usize>,
    /// Text on the marker line (and its continuation lines).
    pub inlines: Vec<InlineSpan>,
    /// Blocks nested below the first paragraph.
    pub children: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Heading {
        level: u8,
        inlines: Vec<InlineSpan>,
    },
    Paragraph {
        inlines: Vec<InlineSpan>,
    },
    ListItem(ListItem),
    Blockquote {
        children: Vec<BlockNode>,
    },
    /// Fenced code; `lines` are the content lines verbatim, fences excluded.
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
        /// False when the input ended before a closing fence.
        closed: bool,
    },
    ThematicBreak,
}

/// A block with the inclusive line range that produced it.
///
/// # Invariants
///
/// - Children ranges lie within the parent's range
/// - Sibling ranges are ordered and disjoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub range: SourceRange,
    pub kind: BlockKind,
}

impl BlockNode {
    pub fn new(range: SourceRange, kind: BlockKind) -> Self {
        Self { range, kind }
    }

    /// Nested blocks of container kinds.
    pub fn children(&self) -> &[BlockNode] {
        match &self.kind {
            BlockKind::Blockquote { children } => children,
            BlockKind::ListItem(item) => &item.children,
            _ => &[],
        }
    }

    pub fn inlines(&self) -> &[InlineSpan] {
        match &self.kind {
            BlockKind::Heading { inlines, .. } | BlockKind::Paragraph { inlines } => inlines,
            BlockKind::ListItem(item) => &item.inlines,
            _ => &[],
        }
    }

    /// Short tag used in outlines and logs.
    pub fn tag(&self) -> &'static str {
        match &self.kind {
            BlockKind::Heading { .. } => "heading",
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::ListItem(_) => "list-item",
            BlockKind::Blockquote { .. } => "blockquote",
            BlockKind::CodeBlock { .. } => "code-block",
            BlockKind::ThematicBreak => "thematic-break",
        }
    }

    /// The same node moved by `delta` lines, children included.
    #[must_use]
    pub fn shifted(&self, delta: isize) -> BlockNode {
        if delta == 0 {
            return self.clone();
        }
        let kind = match &self.kind {
            BlockKind::Blockquote { children } => BlockKind::Blockquote {
                children: children.iter().map(|c| c.shifted(delta)).collect(),
            },
            BlockKind::ListItem(item) => BlockKind::ListItem(ListItem {
                children: item.children.iter().map(|c| c.shifted(delta)).collect(),
                ..item.clone()
            }),
            other => other.clone(),
        };
        BlockNode {
            range: self.range.shifted(delta),
            kind,
        }
    }
}
