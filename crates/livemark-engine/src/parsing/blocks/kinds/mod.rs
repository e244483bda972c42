//! # Block Kinds
//!
//! Block-specific types that own their syntax rules: how a fence closes,
//! what interrupts a paragraph, what makes a list item a task.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list_item;
pub mod paragraph;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use heading::Heading;
pub use list_item::{ItemLines, TaskMarker};
pub use paragraph::Paragraph;
