pub mod lines;
pub mod range;
pub mod slice;

pub use lines::{LineSource, split_lines};
pub use range::SourceRange;
pub use slice::{preview, slice_to_string};
