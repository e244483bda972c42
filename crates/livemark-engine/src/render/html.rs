//! Preview HTML.
//!
//! The preview surface is free to render the tree however it likes; this is
//! the reference rendering used by the CLI and tests. Task items carry the
//! source line of their marker so a click can be mapped back to a
//! [`TaskId`](crate::tasks::TaskId).

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
    highlight::{Category, highlight},
    parsing::{
        DocumentTree,
        blocks::{BlockKind, BlockNode, ListItem, ListMarker},
        inline::{InlineSpan, Strength, unescape},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Render every soft line break inside a paragraph as `<br />`.
    pub hard_breaks: bool,
    /// Wrap code block tokens in `<span class="hl-...">`.
    pub highlight: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            highlight: true,
        }
    }
}

pub const CHECKED_GLYPH: char = '☑';
pub const UNCHECKED_GLYPH: char = '☐';

/// Renders the whole tree, grouping adjacent list items into lists.
pub fn render_document(tree: &DocumentTree, options: &HtmlOptions) -> String {
    let mut out = String::new();
    write_blocks(&tree.blocks, options, &mut out);
    out
}

/// Renders one node on its own; a list item comes out as a bare `<li>`.
pub fn render_block(block: &BlockNode, options: &HtmlOptions) -> String {
    let mut out = String::new();
    write_block(block, options, &mut out);
    out
}

fn write_blocks(blocks: &[BlockNode], options: &HtmlOptions, out: &mut String) {
    let mut open: Option<ListMarker> = None;
    for block in blocks {
        let marker = match &block.kind {
            BlockKind::ListItem(item) => Some(item.marker),
            _ => None,
        };
        let continues =
            matches!((open, marker), (Some(current), Some(m)) if m.same_list(&current));
        if !continues {
            if let Some(current) = open.take() {
                close_list(current, out);
            }
            if let Some(m) = marker {
                open_list(m, out);
                open = Some(m);
            }
        }
        write_block(block, options, out);
    }
    if let Some(current) = open {
        close_list(current, out);
    }
}

fn open_list(marker: ListMarker, out: &mut String) {
    match marker {
        ListMarker::Bullet(_) => out.push_str("<ul>\n"),
        ListMarker::Ordered { number: 1, .. } => out.push_str("<ol>\n"),
        ListMarker::Ordered { number, .. } => {
            let _ = writeln!(out, "<ol start=\"{number}\">");
        }
    }
}

fn close_list(marker: ListMarker, out: &mut String) {
    out.push_str(if marker.is_ordered() {
        "</ol>\n"
    } else {
        "</ul>\n"
    });
}

fn write_block(block: &BlockNode, options: &HtmlOptions, out: &mut String) {
    match &block.kind {
        BlockKind::Heading { level, inlines } => {
            let _ = write!(out, "<h{level}>");
            write_inlines(inlines, options, out);
            let _ = writeln!(out, "</h{level}>");
        }
        BlockKind::Paragraph { inlines } => {
            out.push_str("<p>");
            write_inlines(inlines, options, out);
            out.push_str("</p>\n");
        }
        BlockKind::ListItem(item) => write_item(item, block.range.start, options, out),
        BlockKind::Blockquote { children } => {
            out.push_str("<blockquote>\n");
            write_blocks(children, options, out);
            out.push_str("</blockquote>\n");
        }
        BlockKind::CodeBlock {
            language, lines, ..
        } => {
            match language {
                Some(lang) => {
                    let _ = write!(
                        out,
                        "<pre><code class=\"language-{}\">",
                        encode_double_quoted_attribute(lang)
                    );
                }
                None => out.push_str("<pre><code>"),
            }
            let text = lines.join("\n");
            write_code(&text, language.as_deref(), options, out);
            if !lines.is_empty() {
                out.push('\n');
            }
            out.push_str("</code></pre>\n");
        }
        BlockKind::ThematicBreak => out.push_str("<hr />\n"),
    }
}

fn write_item(item: &ListItem, line: usize, options: &HtmlOptions, out: &mut String) {
    match item.checked {
        Some(checked) => {
            let glyph = if checked {
                CHECKED_GLYPH
            } else {
                UNCHECKED_GLYPH
            };
            let _ = write!(
                out,
                "<li class=\"task-list-item\" data-source-line=\"{line}\">{glyph}"
            );
            if !item.inlines.is_empty() {
                out.push(' ');
            }
        }
        None => out.push_str("<li>"),
    }
    write_inlines(&item.inlines, options, out);
    if !item.children.is_empty() {
        out.push('\n');
        write_blocks(&item.children, options, out);
    }
    out.push_str("</li>\n");
}

fn write_code(text: &str, language: Option<&str>, options: &HtmlOptions, out: &mut String) {
    if !options.highlight {
        out.push_str(&encode_text(text));
        return;
    }
    for span in highlight(text, language) {
        let piece = encode_text(&text[span.range]);
        match span.category {
            Category::Plain => out.push_str(&piece),
            category => {
                let _ = write!(out, "<span class=\"{}\">{piece}</span>", category.css_class());
            }
        }
    }
}

fn write_inlines(spans: &[InlineSpan], options: &HtmlOptions, out: &mut String) {
    for span in spans {
        match span {
            InlineSpan::Text(text) => out.push_str(&encode_text(&unescape(text))),
            InlineSpan::LineBreak if options.hard_breaks => out.push_str("<br />\n"),
            InlineSpan::LineBreak => out.push('\n'),
            InlineSpan::Emphasis { strength, children } => {
                let tag = match strength {
                    Strength::Regular => "em",
                    Strength::Strong => "strong",
                };
                let _ = write!(out, "<{tag}>");
                write_inlines(children, options, out);
                let _ = write!(out, "</{tag}>");
            }
            InlineSpan::Strikethrough(children) => {
                out.push_str("<del>");
                write_inlines(children, options, out);
                out.push_str("</del>");
            }
            InlineSpan::CodeSpan { raw } => {
                let _ = write!(out, "<code>{}</code>", encode_text(raw));
            }
            InlineSpan::Link { target, children } => {
                let _ = write!(
                    out,
                    "<a href=\"{}\">",
                    encode_double_quoted_attribute(&unescape(target))
                );
                write_inlines(children, options, out);
                out.push_str("</a>");
            }
            InlineSpan::Image { target, alt } => {
                let _ = write!(
                    out,
                    "<img src=\"{}\" alt=\"{}\" />",
                    encode_double_quoted_attribute(&unescape(target)),
                    encode_double_quoted_attribute(&unescape(alt))
                );
            }
        }
    }
}
