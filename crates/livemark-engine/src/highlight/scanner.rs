use std::ops::Range;

use super::{Category, HighlightSpan, languages::Language};

/// Classifies `text` with `lang`'s rules into contiguous spans.
///
/// Spans cover every byte of `text` in order; neighbours never share a
/// category.
pub fn scan(text: &str, lang: &Language) -> Vec<HighlightSpan> {
    let mut out = Spans::default();
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        let Some(ch) = rest.chars().next() else {
            break;
        };
        let (len, category) = if let Some(len) = line_comment(rest, lang) {
            (len, Category::Comment)
        } else if let Some(len) = block_comment(rest, lang) {
            (len, Category::Comment)
        } else if lang.quotes.contains(&ch) {
            (string_len(rest, ch, lang.multiline_quotes.contains(&ch)), Category::String)
        } else if ch.is_alphanumeric() || ch == '_' {
            let len = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let category = if lang.keywords.contains(&&rest[..len]) {
                Category::Keyword
            } else {
                Category::Plain
            };
            (len, category)
        } else if ch.is_ascii_punctuation() {
            (1, Category::Punctuation)
        } else {
            (ch.len_utf8(), Category::Plain)
        };
        out.push(i..i + len, category);
        i += len;
    }
    out.0
}

fn line_comment(rest: &str, lang: &Language) -> Option<usize> {
    let marker = lang.line_comment?;
    rest.starts_with(marker)
        .then(|| rest.find('\n').unwrap_or(rest.len()))
}

fn block_comment(rest: &str, lang: &Language) -> Option<usize> {
    let (open, close) = lang.block_comment?;
    if !rest.starts_with(open) {
        return None;
    }
    Some(
        rest[open.len()..]
            .find(close)
            .map_or(rest.len(), |at| open.len() + at + close.len()),
    )
}

/// Length of a string literal starting at `rest`, closing quote included.
/// Unterminated strings run to the end of the line (or text).
fn string_len(rest: &str, quote: char, multiline: bool) -> usize {
    let mut escaped = false;
    for (at, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return at + c.len_utf8();
        } else if c == '\n' && !multiline {
            return at;
        }
    }
    rest.len()
}

#[derive(Default)]
struct Spans(Vec<HighlightSpan>);

impl Spans {
    fn push(&mut self, range: Range<usize>, category: Category) {
        let extends = self
            .0
            .last()
            .is_some_and(|last| last.category == category && last.range.end == range.start);
        match self.0.last_mut() {
            Some(last) if extends => last.range.end = range.end,
            _ => self.0.push(HighlightSpan { range, category }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::languages::lookup;

    fn classes<'a>(text: &'a str, tag: &str) -> Vec<(&'a str, Category)> {
        let lang = lookup(tag).expect("known language");
        scan(text, lang)
            .into_iter()
            .map(|s| (&text[s.range], s.category))
            .collect()
    }

    #[test]
    fn rust_keywords_and_strings() {
        assert_eq!(
            classes(r#"let s = "a\"b";"#, "rust"),
            vec![
                ("let", Category::Keyword),
                (" s ", Category::Plain),
                ("=", Category::Punctuation),
                (" ", Category::Plain),
                (r#""a\"b""#, Category::String),
                (";", Category::Punctuation),
            ]
        );
    }

    #[test]
    fn line_comment_stops_at_newline() {
        assert_eq!(
            classes("x # note\ny", "python"),
            vec![
                ("x ", Category::Plain),
                ("# note", Category::Comment),
                ("\ny", Category::Plain),
            ]
        );
    }

    #[test]
    fn block_comment_spans_lines() {
        let spans = classes("/* a\nb */ fn", "rust");
        assert_eq!(spans[0], ("/* a\nb */", Category::Comment));
        assert_eq!(spans[2], ("fn", Category::Keyword));
    }

    #[test]
    fn unterminated_string_ends_at_line_end() {
        let spans = classes("'open\nnext", "python");
        assert_eq!(spans[0], ("'open", Category::String));
        assert_eq!(spans[1], ("\nnext", Category::Plain));
    }

    #[test]
    fn keyword_must_be_whole_word() {
        assert_eq!(classes("letter", "rust"), vec![("letter", Category::Plain)]);
    }

    #[test]
    fn spans_cover_text_exactly() {
        let text = "fn main() { println!(\"hé\"); } // done\n";
        let spans = scan(text, lookup("rust").expect("rust"));
        let mut next = 0;
        for span in &spans {
            assert_eq!(span.range.start, next);
            next = span.range.end;
        }
        assert_eq!(next, text.len());
        assert!(spans.windows(2).all(|w| w[0].category != w[1].category));
    }
}
