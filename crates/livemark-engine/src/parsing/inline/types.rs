/// How many delimiter characters an emphasis span used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    /// `*a*` or `_a_`.
    Regular,
    /// `**a**` or `__a__`.
    Strong,
}

/// A parsed inline node, owned by its block.
///
/// `Text` keeps the source characters verbatim, backslash escapes included,
/// so unmatched delimiters and malformed constructs survive as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Text(String),
    /// A newline inside the block's text.
    LineBreak,
    Emphasis {
        strength: Strength,
        children: Vec<InlineSpan>,
    },
    /// `~~struck~~`.
    Strikethrough(Vec<InlineSpan>),
    /// Raw zone: content between matching backtick runs, never parsed further.
    CodeSpan { raw: String },
    Link {
        target: String,
        children: Vec<InlineSpan>,
    },
    Image { target: String, alt: String },
}

impl InlineSpan {
    pub fn text(s: impl Into<String>) -> Self {
        InlineSpan::Text(s.into())
    }

    /// Children of container spans; empty for leaves.
    pub fn children(&self) -> &[InlineSpan] {
        match self {
            InlineSpan::Emphasis { children, .. }
            | InlineSpan::Strikethrough(children)
            | InlineSpan::Link { children, .. } => children,
            InlineSpan::Text(_)
            | InlineSpan::LineBreak
            | InlineSpan::CodeSpan { .. }
            | InlineSpan::Image { .. } => &[],
        }
    }
}

/// Concatenated visible text of `spans`, with escapes resolved.
///
/// Used for image alt text and outlines.
pub fn plain_text(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    push_plain(spans, &mut out);
    out
}

fn push_plain(spans: &[InlineSpan], out: &mut String) {
    for span in spans {
        match span {
            InlineSpan::Text(t) => out.push_str(&unescape(t)),
            InlineSpan::LineBreak => out.push('\n'),
            InlineSpan::CodeSpan { raw } => out.push_str(raw),
            InlineSpan::Image { alt, .. } => out.push_str(alt),
            InlineSpan::Emphasis { children, .. }
            | InlineSpan::Strikethrough(children)
            | InlineSpan::Link { children, .. } => push_plain(children, out),
        }
    }
}

/// Removes the backslash from escaped ASCII punctuation.
pub fn unescape(text: &str) -> std::borrow::Cow<'_, str> {
    if !text.contains('\\') {
        return std::borrow::Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '\\' && next.is_ascii_punctuation() => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    std::borrow::Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_drops_escape_backslashes_only() {
        assert_eq!(unescape(r"\*a\* \q \\"), r"*a* \q \");
    }

    #[test]
    fn plain_text_flattens_nesting() {
        let spans = vec![
            InlineSpan::text("a "),
            InlineSpan::Emphasis {
                strength: Strength::Strong,
                children: vec![InlineSpan::text("b")],
            },
            InlineSpan::CodeSpan { raw: "c".into() },
        ];
        assert_eq!(plain_text(&spans), "a bc");
    }
}
