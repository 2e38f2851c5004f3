//! Line break helpers.
//!
//! Highlighted blocks may carry any of the three common newline conventions. Each of `"\r\n"`,
//! `'\r'` and `'\n'` counts as exactly one line boundary.

use regex::Regex;
use std::sync::LazyLock;

static BREAK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"));

/// Split `text` into physical lines.
///
/// Empty input yields no lines. A trailing break yields a trailing empty line; callers decide
/// whether it is meaningful.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    BREAK_LINE.split(text).collect()
}

/// Number of line breaks in `text` once surrounding whitespace is trimmed.
///
/// A run ending in a single newline therefore counts as zero breaks.
pub fn line_break_count(text: &str) -> usize {
    BREAK_LINE.find_iter(text.trim()).count()
}

/// Returns `true` if `text` contains at least one line break.
pub fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}
