//! # Block Parsing
//!
//! Lines become block nodes in two steps.
//!
//! 1. **Line Classification** (`classify`): each line gets a `LineClass` from
//!    the marker the tokenizer finds at its start. Priority is thematic break,
//!    fence, heading, blockquote, list item, blank, plain text.
//! 2. **Block Construction** (`builder`): a `BlockParser` walks the classes
//!    and emits one `BlockNode` per top-level block. Blockquotes and list
//!    items strip their prefix from their lines and recurse.
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode`, `BlockKind`, `ListItem`, `ListMarker`
//! - **`kinds`**: syntax rules owned per block (BlockQuote, CodeFence, Heading,
//!   list items and task markers, Paragraph)
//! - **`content`**: `ContentLine`, a line with container prefixes removed
//! - **`classify`**: `classify()` producing `LineClass`
//! - **`builder`**: the `BlockParser`
//!
//! ## Key Invariants
//!
//! - Nesting depth is unbounded (lists in blockquotes in lists, etc.)
//! - Fenced code blocks are raw zones: no block or inline parsing inside
//! - Every node's range is exactly the lines it consumed; trailing blank
//!   lines belong to nobody

pub mod builder;
pub mod classify;
pub mod content;
pub mod kinds;
pub mod types;

pub use builder::BlockParser;
pub use classify::{LineClass, classify};
pub use content::ContentLine;
pub use types::{BlockKind, BlockNode, ListItem, ListMarker};
