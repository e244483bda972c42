//! # Incremental Rendering
//!
//! Turns a buffer change into a new tree and a [`RenderDiff`] against the
//! previous one, reparsing as little as the parser's lookahead allows.
//!
//! ## Modules
//!
//! - `incremental`: picks the lines to reparse and splices the result
//!   between the untouched head and tail of the old tree
//! - `diff`: structural comparison of two node sequences
//! - `html`: reference preview rendering

pub mod diff;
pub mod html;
pub mod incremental;

pub use diff::{DiffOp, LineShift, RenderDiff, diff_blocks, diff_trees};
pub use html::{HtmlOptions, render_block, render_document};
pub use incremental::{Reparse, reparse};
