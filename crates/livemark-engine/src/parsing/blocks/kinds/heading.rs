/// ATX heading syntax.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    /// Heading text from what follows the opening hashes: surrounding
    /// whitespace and an optional closing `#` sequence removed.
    pub fn content(rest: &str) -> &str {
        let text = rest.trim();
        let without = text.trim_end_matches(Self::MARKER);
        if without.is_empty() {
            return "";
        }
        // A closing sequence must be separated by whitespace.
        if without.len() < text.len() && without.ends_with([' ', '\t']) {
            without.trim_end()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Title", "Title")]
    #[case("Title ##", "Title")]
    #[case("Title#", "Title#")]
    #[case("  spaced  \r", "spaced")]
    #[case("###", "")]
    #[case("C# ", "C#")]
    fn strips_closing_sequence(#[case] rest: &str, #[case] expected: &str) {
        assert_eq!(Heading::content(rest), expected);
    }
}
