use crate::{
    error::{Construct, Diagnostic},
    parsing::{
        inline::{InlineSpan, parse_inline_with_diagnostics},
        rope::{LineSource, SourceRange},
    },
};

use super::{
    classify::{LineClass, classify},
    content::ContentLine,
    kinds::{BlockQuote, CodeFence, Heading, ItemLines, Paragraph, TaskMarker},
    types::{BlockKind, BlockNode, ListItem, ListMarker},
};

/// Builds block nodes from a line source, one top-level node at a time.
///
/// The parser carries no state between nodes except its position, so a
/// parser started at any line where a node begins (or at a blank line
/// before it) produces the same nodes as one that started earlier. The
/// incremental coordinator relies on this to resume mid-document.
///
/// Containers recurse: a blockquote or list item collects its lines,
/// strips its prefix, and runs a nested parser over the result.
pub struct BlockParser<'a, S: LineSource + ?Sized> {
    source: &'a S,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, S: LineSource + ?Sized> BlockParser<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self::starting_at(source, 0)
    }

    /// A parser that starts reading at line `pos` of `source`.
    pub fn starting_at(source: &'a S, pos: usize) -> Self {
        Self {
            source,
            pos,
            diagnostics: vec![],
        }
    }

    /// Index of the next unread line.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Diagnostics recorded so far, oldest first.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Parses everything that is left.
    pub fn parse_all(mut self) -> (Vec<BlockNode>, Vec<Diagnostic>) {
        let blocks = self.by_ref().collect();
        (blocks, self.diagnostics)
    }

    /// The next top-level node, skipping blank lines.
    pub fn next_block(&mut self) -> Option<BlockNode> {
        let count = self.source.line_count();
        while self.pos < count {
            let line = self.source.content_line(self.pos);
            let node = match classify(&line) {
                LineClass::Blank => {
                    self.pos += 1;
                    continue;
                }
                LineClass::ThematicBreak => {
                    self.pos += 1;
                    BlockNode::new(SourceRange::line(line.line), BlockKind::ThematicBreak)
                }
                LineClass::Heading { level, marker_end } => self.heading(&line, level, marker_end),
                LineClass::Fence {
                    fence,
                    len,
                    marker_end,
                } => self.code_fence(&line, fence, len, marker_end),
                LineClass::Blockquote { .. } => self.blockquote(),
                LineClass::ListItem {
                    marker,
                    marker_end,
                    content_column,
                    ..
                } => self.list_item(&line, marker, marker_end, content_column),
                LineClass::Plain => self.paragraph(),
            };
            return Some(node);
        }
        None
    }

    /// Parses inline text whose `\n`-separated lines came from `lines`.
    fn inlines(&mut self, text: &str, lines: &[usize]) -> Vec<InlineSpan> {
        let (spans, unterminated) = parse_inline_with_diagnostics(text);
        for index in unterminated {
            if let Some(&line) = lines.get(index) {
                self.diagnostics
                    .push(Diagnostic::unterminated(line, Construct::Link));
            }
        }
        spans
    }

    fn heading(&mut self, line: &ContentLine, level: u8, marker_end: usize) -> BlockNode {
        self.pos += 1;
        let text = Heading::content(&line.text[marker_end..]);
        let inlines = self.inlines(text, &[line.line]);
        BlockNode::new(
            SourceRange::line(line.line),
            BlockKind::Heading { level, inlines },
        )
    }

    fn code_fence(
        &mut self,
        open: &ContentLine,
        fence: char,
        len: usize,
        marker_end: usize,
    ) -> BlockNode {
        let fence = CodeFence {
            fence,
            len,
            indent: open.indent(),
        };
        let language = CodeFence::language(&open.text[marker_end..]);
        let count = self.source.line_count();
        let mut lines = vec![];
        let mut end = open.line;
        let mut closed = false;

        self.pos += 1;
        while self.pos < count {
            let line = self.source.content_line(self.pos);
            self.pos += 1;
            end = line.line;
            if fence.closes(&line.text) {
                closed = true;
                break;
            }
            lines.push(line.strip_indent(fence.indent).text);
        }

        if !closed {
            self.diagnostics
                .push(Diagnostic::unterminated(open.line, Construct::CodeFence));
        }
        BlockNode::new(
            SourceRange::new(open.line, end),
            BlockKind::CodeBlock {
                language,
                lines,
                closed,
            },
        )
    }

    fn blockquote(&mut self) -> BlockNode {
        let count = self.source.line_count();
        let mut inner = vec![];
        while self.pos < count {
            let line = self.source.content_line(self.pos);
            let Some(quoted) = BlockQuote::inner(&line, classify(&line)) else {
                break;
            };
            inner.push(quoted);
            self.pos += 1;
        }
        let range = span_of(&inner);
        let children = self.nested(&inner);
        BlockNode::new(range, BlockKind::Blockquote { children })
    }

    fn list_item(
        &mut self,
        first: &ContentLine,
        marker: ListMarker,
        marker_end: usize,
        content_column: usize,
    ) -> BlockNode {
        let mut content = first.advance(marker_end);
        let checked = TaskMarker::parse(&content.text);
        let checkbox_column = checked.map(|_| content.column);
        if checked.is_some() {
            content = content.advance(TaskMarker::LEN);
        }

        let mut item = ItemLines::default();
        item.push(content);

        let count = self.source.line_count();
        self.pos += 1;
        while self.pos < count {
            let line = self.source.content_line(self.pos);
            if line.is_blank() {
                // Blank lines belong to the item only if indented content follows.
                let source = self.source;
                let next = (self.pos + 1..count).find(|&i| !source.content_line(i).is_blank());
                match next {
                    Some(i) if self.source.content_line(i).indent() >= content_column => {
                        for blank in self.pos..i {
                            item.push(source.content_line(blank).strip_indent(content_column));
                        }
                        self.pos = i;
                        continue;
                    }
                    _ => break,
                }
            }
            if line.indent() >= content_column {
                item.push(line.strip_indent(content_column));
            } else if item.accepts_lazy(&line) {
                item.push(line.trim_start());
            } else {
                break;
            }
            self.pos += 1;
        }

        let range = SourceRange::new(first.line, span_of(&item.lines).end);
        let mut children = self.nested(&item.lines);
        // A paragraph starting on the marker line is the item's own text.
        let leads_with_text = matches!(
            children.first(),
            Some(BlockNode { range, kind: BlockKind::Paragraph { .. } }) if range.start == first.line
        );
        let inlines = if leads_with_text {
            match children.remove(0).kind {
                BlockKind::Paragraph { inlines } => inlines,
                _ => vec![],
            }
        } else {
            vec![]
        };

        BlockNode::new(
            range,
            BlockKind::ListItem(ListItem {
                marker,
                checked,
                checkbox_column,
                inlines,
                children,
            }),
        )
    }

    fn paragraph(&mut self) -> BlockNode {
        let count = self.source.line_count();
        let mut text = String::new();
        let mut lines = vec![];
        while self.pos < count {
            let line = self.source.content_line(self.pos);
            if !lines.is_empty() && !Paragraph::continues(classify(&line)) {
                break;
            }
            if !lines.is_empty() {
                text.push('\n');
            }
            text.push_str(line.trim_start().text.trim_end_matches('\r'));
            lines.push(line.line);
            self.pos += 1;
        }
        let range = SourceRange::new(lines[0], lines[lines.len() - 1]);
        let inlines = self.inlines(&text, &lines);
        BlockNode::new(range, BlockKind::Paragraph { inlines })
    }

    fn nested(&mut self, lines: &[ContentLine]) -> Vec<BlockNode> {
        let (blocks, diagnostics) = BlockParser::new(lines).parse_all();
        self.diagnostics.extend(diagnostics);
        blocks
    }
}

impl<S: LineSource + ?Sized> Iterator for BlockParser<'_, S> {
    type Item = BlockNode;

    fn next(&mut self) -> Option<BlockNode> {
        self.next_block()
    }
}

/// Range from the first to the last of a non-empty run of lines.
fn span_of(lines: &[ContentLine]) -> SourceRange {
    match (lines.first(), lines.last()) {
        (Some(first), Some(last)) => SourceRange::new(first.line, last.line),
        _ => SourceRange::line(0),
    }
}
