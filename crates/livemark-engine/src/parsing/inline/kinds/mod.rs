//! # Inline Kinds
//!
//! Each inline construct owns its delimiters and the small rules that decide
//! whether a token can take part in it. The parser asks these types; it
//! never hardcodes `*`, `[` or `` ` `` itself.
//!
//! - **`CodeSpan`**: backtick runs, content normalisation
//! - **`Emphasis`**: `*`, `_` and `~` runs, flanking and the rule of three
//! - **`Link`**: brackets, image bang, destination characters

pub mod code_span;
pub mod emphasis;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::{Emphasis, Flanking};
pub use link::Link;
