/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';

    /// Turns the text between the backtick runs into the span's raw content.
    ///
    /// Line endings become spaces, and one space is stripped from each side
    /// when both sides have one and the content is not all spaces.
    pub fn normalize(content: &str) -> String {
        let s = content.replace("\r\n", " ").replace('\n', " ");
        let strip =
            s.len() >= 2 && s.starts_with(' ') && s.ends_with(' ') && s.bytes().any(|b| b != b' ');
        if strip {
            s[1..s.len() - 1].to_string()
        } else {
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_padding_space() {
        assert_eq!(CodeSpan::normalize(" `a` "), "`a`");
        assert_eq!(CodeSpan::normalize("  x  "), " x ");
    }

    #[test]
    fn keeps_all_space_content() {
        assert_eq!(CodeSpan::normalize("  "), "  ");
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(CodeSpan::normalize("a\nb"), "a b");
    }
}
