//! # Syntax Highlighting
//!
//! A best-effort lexical pass over code spans and fenced code blocks. Each
//! known language gets a small rule table (`languages`); the `scanner`
//! splits text into keyword, string, comment, punctuation and plain runs.
//! Unknown or missing language tags yield one plain span, and inline code
//! spans are always plain since they carry no tag.
//!
//! Highlights are display metadata delivered beside the tree; they are
//! never part of it.

pub mod languages;
pub mod scanner;

use std::ops::Range;

use crate::parsing::{
    DocumentTree,
    blocks::{BlockKind, BlockNode},
    inline::InlineSpan,
    rope::SourceRange,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Keyword,
    String,
    Comment,
    Punctuation,
    Plain,
}

impl Category {
    /// CSS class used by the HTML preview.
    pub fn css_class(self) -> &'static str {
        match self {
            Category::Keyword => "hl-keyword",
            Category::String => "hl-string",
            Category::Comment => "hl-comment",
            Category::Punctuation => "hl-punctuation",
            Category::Plain => "hl-plain",
        }
    }
}

/// A categorised byte range of a code node's raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub range: Range<usize>,
    pub category: Category,
}

/// Highlights for one code region of a top-level block.
///
/// A block may hold several regions (code spans in a paragraph, code
/// blocks inside a list item); `ordinal` numbers them depth-first in
/// document order. For a code block the raw text is its lines joined with
/// `\n`; for a code span it is the span's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeHighlights {
    /// Range of the top-level block holding the region.
    pub node: SourceRange,
    pub ordinal: usize,
    pub language: Option<String>,
    pub spans: Vec<HighlightSpan>,
}

/// Classifies `text` written in `language`. Never fails.
pub fn highlight(text: &str, language: Option<&str>) -> Vec<HighlightSpan> {
    match language.and_then(languages::lookup) {
        Some(lang) => scanner::scan(text, lang),
        None => vec![HighlightSpan {
            range: 0..text.len(),
            category: Category::Plain,
        }],
    }
}

/// Highlights every code region inside a top-level block.
pub fn highlight_block(block: &BlockNode) -> Vec<CodeHighlights> {
    let mut out = vec![];
    collect_block(block, block.range, &mut out);
    out
}

/// Highlights every code region of the tree.
pub fn highlight_tree(tree: &DocumentTree) -> Vec<CodeHighlights> {
    tree.blocks.iter().flat_map(highlight_block).collect()
}

fn collect_block(block: &BlockNode, node: SourceRange, out: &mut Vec<CodeHighlights>) {
    if let BlockKind::CodeBlock {
        language, lines, ..
    } = &block.kind
    {
        let text = lines.join("\n");
        out.push(CodeHighlights {
            node,
            ordinal: out.len(),
            spans: highlight(&text, language.as_deref()),
            language: language.clone(),
        });
        return;
    }
    collect_inlines(block.inlines(), node, out);
    for child in block.children() {
        collect_block(child, node, out);
    }
}

fn collect_inlines(spans: &[InlineSpan], node: SourceRange, out: &mut Vec<CodeHighlights>) {
    for span in spans {
        if let InlineSpan::CodeSpan { raw } = span {
            out.push(CodeHighlights {
                node,
                ordinal: out.len(),
                language: None,
                spans: highlight(raw, None),
            });
        }
        collect_inlines(span.children(), node, out);
    }
}
