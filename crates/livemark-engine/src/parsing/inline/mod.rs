//! # Inline Parsing
//!
//! Token-driven inline parsing in two passes over one block's text.
//!
//! 1. **Scan**: walks the token stream left to right. Code spans are raw
//!    zones resolved first, so nothing inside backticks is parsed further.
//!    Links and images are resolved with a bracket stack when `]` is
//!    followed by a well-formed `(target)`.
//! 2. **Resolve**: matches emphasis and strikethrough delimiter runs with a
//!    delimiter stack, separately at each nesting level (inside a link's
//!    text, matching stops at the link boundary).
//!
//! ## Modules
//!
//! - **`types`**: `InlineSpan` and `Strength`
//! - **`kinds`**: per-construct delimiter knowledge (CodeSpan, Emphasis, Link)
//! - **`cursor`**: `Cursor` over the token stream
//! - **`parser`**: `parse_inline()` entry point
//!
//! Anything left unmatched degrades to literal text; the parser has no
//! failure mode.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{parse_inline, parse_inline_with_diagnostics};
pub use types::{InlineSpan, Strength, plain_text, unescape};
