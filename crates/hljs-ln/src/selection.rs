//! Selection resolver: recovers the plain text a user meant to copy from a rendered table.
//!
//! A native selection across table rows loses the per-row newlines, and its text may differ
//! from the cell text at both ends. The resolver rebuilds the copied text from the first and
//! last cells (trimmed to what the selection actually covers) and the full text of every line in
//! between.

use crate::error::SelectionError;
use std::collections::BTreeMap;

/// A selection mapped onto line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSpan {
    /// Line number of the cell holding the selection anchor.
    pub anchor_line: i64,
    /// Line number of the cell holding the selection focus.
    pub focus_line: i64,
    /// Full text of the anchor cell.
    pub anchor_text: String,
    /// Full text of the focus cell.
    pub focus_text: String,
    /// The selection's own plain-text serialization.
    pub raw_selection: String,
}

impl SelectionSpan {
    /// Returns `true` if both endpoints are on the same line.
    pub fn is_single_line(&self) -> bool {
        self.anchor_line == self.focus_line
    }

    /// Returns `true` if the focus lies on an earlier line than the anchor.
    pub fn is_backward(&self) -> bool {
        self.anchor_line > self.focus_line
    }

    /// The same selection with the lower line number as anchor.
    pub fn normalized(self) -> Self {
        if !self.is_backward() {
            return self;
        }
        Self {
            anchor_line: self.focus_line,
            focus_line: self.anchor_line,
            anchor_text: self.focus_text,
            focus_text: self.anchor_text,
            raw_selection: self.raw_selection,
        }
    }
}

/// Full text of a rendered line, looked up by line number.
pub trait LineLookup {
    /// Text content of the content cell for `line_number`, if present.
    fn line_text(&self, line_number: i64) -> Option<String>;
}

impl<F> LineLookup for F
where
    F: Fn(i64) -> Option<String>,
{
    fn line_text(&self, line_number: i64) -> Option<String> {
        self(line_number)
    }
}

impl LineLookup for BTreeMap<i64, String> {
    fn line_text(&self, line_number: i64) -> Option<String> {
        self.get(&line_number).cloned()
    }
}

/// Reconstruct the copied text for `span`.
///
/// A selection within one line is already correct and is returned verbatim. Otherwise the
/// result is the covered tail of the first line, every line in between, and the covered head of
/// the last line, joined with `'\n'`. Backward selections resolve to the same text as the
/// equivalent forward selection.
pub fn resolve(span: &SelectionSpan, lines: &impl LineLookup) -> Result<String, SelectionError> {
    if span.is_single_line() {
        return Ok(span.raw_selection.clone());
    }

    let span = span.clone().normalized();
    let selected = span.raw_selection.as_str();
    let first = covered_tail(&span.anchor_text, selected);
    let last = covered_head(&span.focus_text, selected);

    let mut text = String::from(first);
    for line_number in span.anchor_line + 1..span.focus_line {
        let line = lines
            .line_text(line_number)
            .ok_or(SelectionError::MissingLine(line_number))?;
        text.push('\n');
        text.push_str(&line);
    }
    text.push('\n');
    text.push_str(last);
    Ok(text)
}

/// Longest suffix of `line` that `selected` starts with.
///
/// Drops leading characters one at a time; bounded by the length of `line` since the empty
/// remainder always matches.
fn covered_tail<'a>(line: &'a str, selected: &str) -> &'a str {
    line.char_indices()
        .map(|(start, _)| &line[start..])
        .find(|rest| selected.starts_with(rest))
        .unwrap_or_default()
}

/// Longest prefix of `line` that occurs in `selected`.
///
/// Drops trailing characters one at a time; bounded like [`covered_tail`].
fn covered_head<'a>(line: &'a str, selected: &str) -> &'a str {
    std::iter::once(line.len())
        .chain(line.char_indices().rev().map(|(start, _)| start))
        .map(|end| &line[..end])
        .find(|head| selected.rfind(head).is_some())
        .unwrap_or_default()
}
