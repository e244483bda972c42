/// Link and image syntax: `[text](target)` and `![alt](target)`.
pub struct Link;

impl Link {
    pub const OPEN: char = '[';
    pub const CLOSE: char = ']';
    pub const TARGET_OPEN: char = '(';
    pub const TARGET_CLOSE: char = ')';
    pub const IMAGE: char = '!';

    /// Whether `text` may appear inside a destination.
    ///
    /// Destinations are a single unbroken run: no whitespace, no nested
    /// parentheses.
    pub fn allowed_in_target(text: &str) -> bool {
        !text
            .chars()
            .any(|c| c.is_whitespace() || c == Self::TARGET_OPEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_whitespace_and_parens() {
        assert!(Link::allowed_in_target("https://x.org/a_b"));
        assert!(!Link::allowed_in_target("a b"));
        assert!(!Link::allowed_in_target("a("));
    }
}
