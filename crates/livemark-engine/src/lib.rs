pub mod buffer;
pub mod error;
pub mod highlight;
pub mod parsing;
pub mod render;
pub mod session;
pub mod tasks;

// Re-export key types for easier usage
pub use buffer::{EditDescriptor, LineChange, SourceBuffer};
pub use error::{Construct, Diagnostic, EngineError};
pub use highlight::{Category, CodeHighlights, HighlightSpan};
pub use parsing::{
    DocumentTree,
    blocks::{BlockKind, BlockNode, ListItem, ListMarker},
    inline::{InlineSpan, Strength},
    parse_document,
    rope::SourceRange,
};
pub use render::{DiffOp, HtmlOptions, LineShift, RenderDiff};
pub use session::{Delivery, Pipeline, PipelineHandle, PipelineOptions, Request, RenderUpdate, Session};
pub use tasks::{TaskId, TaskItem};
