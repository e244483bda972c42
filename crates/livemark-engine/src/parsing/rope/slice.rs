use xi_rope::Rope;

/// Extracts the byte range `[start, end)` of the rope as an owned String.
///
/// This allocates; callers reading single lines should prefer
/// [`SourceBuffer::line`](crate::buffer::SourceBuffer::line).
pub fn slice_to_string(rope: &Rope, start: usize, end: usize) -> String {
    rope.slice_to_cow(start..end).into_owned()
}

/// Truncates `text` to at most `max` bytes (on a char boundary) with a "..." suffix.
///
/// Used for human-readable outline output.
pub fn preview(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut s = text[..cut].to_string();
    s.push_str("...");
    s
}
