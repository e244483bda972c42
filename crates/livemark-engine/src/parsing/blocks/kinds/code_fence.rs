use crate::parsing::tokens::{LineContext, MarkerKind, line_marker};

/// An open code fence: the character and run length that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFence {
    pub fence: char,
    pub len: usize,
    /// Indentation of the opening fence, stripped from content lines.
    pub indent: usize,
}

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';

    /// The language tag: first word of the info string.
    pub fn language(info: &str) -> Option<String> {
        info.split_whitespace().next().map(str::to_string)
    }

    /// Whether `text` closes this fence: same character, a run at least as
    /// long as the opener, nothing but whitespace after it.
    pub fn closes(&self, text: &str) -> bool {
        matches!(
            line_marker(text, LineContext::InsideFence),
            Some((MarkerKind::Fence { fence }, len, _)) if fence == self.fence && len >= self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fence(fence: char, len: usize) -> CodeFence {
        CodeFence {
            fence,
            len,
            indent: 0,
        }
    }

    #[test]
    fn closes_with_matching_or_longer_run() {
        assert!(fence('`', 3).closes("```"));
        assert!(fence('`', 3).closes("`````  "));
        assert!(fence('~', 3).closes("~~~"));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        assert!(!fence('`', 3).closes("~~~"));
        assert!(!fence('~', 3).closes("```"));
        assert!(!fence('`', 4).closes("```"));
        assert!(!fence('`', 3).closes("``` rust"));
    }

    #[test]
    fn language_is_first_word() {
        assert_eq!(CodeFence::language(" rust ignore"), Some("rust".into()));
        assert_eq!(CodeFence::language("  "), None);
    }
}
