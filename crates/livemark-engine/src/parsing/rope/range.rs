/// An inclusive line span `[start, end]` of the source buffer.
///
/// Every block node records the exact lines that produced it. Ranges are the
/// identity that survives reparsing, so they are kept small and `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceRange {
    /// First line (0-based).
    pub start: usize,
    /// Last line, inclusive.
    pub end: usize,
}

impl SourceRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted source range {start}..={end}");
        Self { start, end }
    }

    /// A range covering exactly one line.
    pub fn line(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Number of lines covered. Never zero.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn contains(self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    #[must_use]
    pub fn intersects(self, other: SourceRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Moves the range by `delta` lines. Saturates at line 0.
    #[must_use]
    pub fn shifted(self, delta: isize) -> Self {
        Self {
            start: self.start.saturating_add_signed(delta),
            end: self.end.saturating_add_signed(delta),
        }
    }
}

impl std::fmt::Display for SourceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
