//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`outline`**: renders a `DocumentTree` as a stable indented text outline
//!   for `insta` snapshots and the CLI's `tree` command
//! - **`invariants`**: runtime checks for parser correctness (ranges in bounds,
//!   siblings ordered and disjoint, children inside parents, gaps blank)

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::{format_inlines, format_tree};
