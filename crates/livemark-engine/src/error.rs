use thiserror::Error;

/// Failures of the engine's API contract.
///
/// Malformed markdown is never an error: anything that does not parse as a
/// construct degrades to literal text. Only misuse by the caller ends up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("edit range {start}..{end} is outside the buffer ({line_count} lines)")]
    MalformedEditRange {
        start: usize,
        end: usize,
        line_count: usize,
    },

    #[error("task item on line {line} no longer matches the source")]
    StaleReference { line: usize },

    #[error("edit pipeline has shut down")]
    PipelineClosed,
}

/// A construct that was still open when its input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    /// A code fence with no closing fence; it runs to the end of its container.
    CodeFence,
    /// A `[text](target` link whose destination never closed.
    Link,
}

/// Non-fatal parse note for callers that want to surface recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Source line where the construct opened.
    pub line: usize,
    pub construct: Construct,
}

impl Diagnostic {
    pub fn unterminated(line: usize, construct: Construct) -> Self {
        Self { line, construct }
    }

    #[must_use]
    pub fn shifted(self, delta: isize) -> Self {
        Self {
            line: self.line.saturating_add_signed(delta),
            construct: self.construct,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.construct {
            Construct::CodeFence => "code fence",
            Construct::Link => "link",
        };
        write!(f, "line {}: unterminated {what}", self.line + 1)
    }
}
