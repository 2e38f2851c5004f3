//! Line fragment extraction.

use crate::line_break::split_lines;

/// Split line-aligned markup into one fragment per physical line.
///
/// The input must already have gone through the [`LineSplitter`](crate::LineSplitter), otherwise
/// fragments may contain unbalanced tags. A final fragment that is blank after trimming stands
/// for the block's trailing newline and is dropped.
pub fn line_fragments(html: &str) -> Vec<&str> {
    let mut lines = split_lines(html);
    if lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_fragments() {
        assert!(line_fragments("").is_empty());
    }

    #[test]
    fn test_trailing_newline_is_dropped() {
        assert_eq!(line_fragments("a\nb\n"), vec!["a", "b"]);
        assert_eq!(line_fragments("a\r\nb\r\n  "), vec!["a", "b"]);
    }

    #[test]
    fn test_inner_empty_lines_are_kept() {
        assert_eq!(line_fragments("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_only_one_trailing_line_is_dropped() {
        assert_eq!(line_fragments("a\n\n"), vec!["a", ""]);
    }
}
