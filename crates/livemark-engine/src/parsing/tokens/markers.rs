//! Line-start markers: the block-level syntax a line can open with.

use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::blocks::content::advance_column;

/// Which block construct a line marker opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    ThematicBreak,
    /// Opening or closing code fence using `fence` (`` ` `` or `~`).
    Fence { fence: char },
    Heading,
    Blockquote,
    Bullet(char),
    Ordered { number: u64, delimiter: char },
}

/// A marker found at the start of a line.
///
/// `len` is the marker's byte length including leading indentation and the
/// whitespace that separates it from content. `level` depends on the kind:
/// heading depth, fence run length, count of thematic break characters, or
/// for list markers the column where item content starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub level: usize,
    pub len: usize,
}

fn thematic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ {0,3}(?:(?:\*[ \t]*){3,}|(?:-[ \t]*){3,}|(?:_[ \t]*){3,})$")
            .expect("valid regex")
    })
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("valid regex"))
}

fn closing_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})[ \t]*$").expect("valid regex"))
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+|$)").expect("valid regex"))
}

fn blockquote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}> ?").expect("valid regex"))
}

fn list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^( {0,3})(?:([-*+])|([0-9]{1,9})([.)]))([ \t]*)").expect("valid regex")
    })
}

/// The line without a trailing carriage return.
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Finds the marker a line opens with in normal block context.
///
/// Checked in priority order: thematic break, fence, heading, blockquote,
/// list item. A line with none of these is plain text (or blank).
pub fn scan(line: &str) -> Option<Marker> {
    let line = strip_cr(line);

    if thematic_re().is_match(line) {
        let level = line.chars().filter(|c| matches!(c, '*' | '-' | '_')).count();
        return Some(Marker {
            kind: MarkerKind::ThematicBreak,
            level,
            len: line.len(),
        });
    }

    if let Some(caps) = fence_re().captures(line) {
        let run = &caps[1];
        let fence = if run.starts_with('`') { '`' } else { '~' };
        let end = caps.get(0).map_or(0, |m| m.end());
        // Backtick fences cannot carry a backtick in their info string.
        if fence == '~' || !line[end..].contains('`') {
            return Some(Marker {
                kind: MarkerKind::Fence { fence },
                level: run.len(),
                len: end,
            });
        }
    }

    if let Some(caps) = heading_re().captures(line) {
        return Some(Marker {
            kind: MarkerKind::Heading,
            level: caps[1].len(),
            len: caps.get(0).map_or(0, |m| m.end()),
        });
    }

    if let Some(m) = blockquote_re().find(line) {
        return Some(Marker {
            kind: MarkerKind::Blockquote,
            level: 1,
            len: m.end(),
        });
    }

    scan_list(line)
}

fn scan_list(line: &str) -> Option<Marker> {
    let caps = list_re().captures(line)?;
    let whole = caps.get(0)?;
    let gap = caps.get(5)?;
    let rest = &line[whole.end()..];
    // A marker must be followed by whitespace or end the line.
    if gap.is_empty() && !rest.is_empty() {
        return None;
    }

    let kind = if let Some(bullet) = caps.get(2) {
        MarkerKind::Bullet(bullet.as_str().chars().next()?)
    } else {
        MarkerKind::Ordered {
            number: caps[3].parse().ok()?,
            delimiter: caps[4].chars().next()?,
        }
    };

    let marker_end = gap.start();
    let marker_col = line[..marker_end].chars().fold(0, advance_column);
    let gap_end_col = gap.as_str().chars().fold(marker_col, advance_column);

    // Empty items and items indented by five or more columns take a single
    // space; the rest of the gap belongs to the content.
    let (len, level) = if rest.is_empty() {
        (whole.end(), marker_col + 1)
    } else if gap_end_col - marker_col > 4 {
        let first = gap.as_str().chars().next().map_or(0, char::len_utf8);
        (marker_end + first, marker_col + 1)
    } else {
        (whole.end(), gap_end_col)
    };

    Some(Marker { kind, level, len })
}

/// Matches a line that could close a fence: fence run, then only whitespace.
pub fn scan_closing_fence(line: &str) -> Option<Marker> {
    let trimmed = strip_cr(line);
    let caps = closing_fence_re().captures(trimmed)?;
    let run = caps.get(1)?;
    let fence = if run.as_str().starts_with('`') { '`' } else { '~' };
    Some(Marker {
        kind: MarkerKind::Fence { fence },
        level: run.len(),
        len: run.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kind(line: &str) -> Option<MarkerKind> {
        scan(line).map(|m| m.kind)
    }

    #[rstest]
    #[case("---", Some(MarkerKind::ThematicBreak))]
    #[case(" * * *", Some(MarkerKind::ThematicBreak))]
    #[case("___\r", Some(MarkerKind::ThematicBreak))]
    #[case("```rust", Some(MarkerKind::Fence { fence: '`' }))]
    #[case("~~~", Some(MarkerKind::Fence { fence: '~' }))]
    #[case("``` a`b", None)]
    #[case("# Title", Some(MarkerKind::Heading))]
    #[case("######", Some(MarkerKind::Heading))]
    #[case("####### seven", None)]
    #[case("#hashtag", None)]
    #[case("> quote", Some(MarkerKind::Blockquote))]
    #[case(">", Some(MarkerKind::Blockquote))]
    #[case("- item", Some(MarkerKind::Bullet('-')))]
    #[case("+", Some(MarkerKind::Bullet('+')))]
    #[case("-item", None)]
    #[case("12) x", Some(MarkerKind::Ordered { number: 12, delimiter: ')' }))]
    #[case("1234567890. x", None)]
    #[case("    - deep", None)]
    #[case("plain text", None)]
    #[case("", None)]
    fn classifies_markers(#[case] line: &str, #[case] expected: Option<MarkerKind>) {
        assert_eq!(kind(line), expected);
    }

    #[test]
    fn thematic_break_beats_list_item() {
        assert_eq!(kind("- - -"), Some(MarkerKind::ThematicBreak));
        assert_eq!(kind("* * *"), Some(MarkerKind::ThematicBreak));
    }

    #[test]
    fn heading_level_and_length() {
        let m = scan("### Three").unwrap();
        assert_eq!((m.level, m.len), (3, 4));
    }

    #[test]
    fn list_content_column_includes_gap() {
        let m = scan("-   spaced").unwrap();
        assert_eq!((m.level, m.len), (4, 4));
        let m = scan("10. ten").unwrap();
        assert_eq!((m.level, m.len), (4, 4));
    }

    #[test]
    fn wide_gap_keeps_one_space() {
        let m = scan("-      code").unwrap();
        assert_eq!((m.level, m.len), (2, 2));
    }

    #[test]
    fn empty_item_content_column() {
        let m = scan("  -").unwrap();
        assert_eq!((m.level, m.len), (4, 3));
    }

    #[test]
    fn tab_after_marker_expands() {
        let m = scan("-\titem").unwrap();
        assert_eq!((m.level, m.len), (4, 2));
    }

    #[test]
    fn closing_fence_allows_trailing_whitespace_only() {
        assert_eq!(scan_closing_fence("````  ").map(|m| m.level), Some(4));
        assert_eq!(scan_closing_fence("``` x"), None);
    }
}
