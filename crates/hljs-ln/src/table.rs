//! Table renderer: one row per line fragment, gutter cell plus content cell.

use crate::options::RenderOptions;
use std::borrow::Cow;
use std::fmt::Write;

/// Class of the generated table.
pub const TABLE_NAME: &str = "hljs-ln";
/// Class shared by the gutter and content cells.
pub const LINE_NAME: &str = "hljs-ln-line";
/// Class of content cells.
pub const CODE_BLOCK_NAME: &str = "hljs-ln-code";
/// Class of gutter cells.
pub const NUMBERS_BLOCK_NAME: &str = "hljs-ln-numbers";
/// Class of the element inside the gutter cell that displays the number.
pub const NUMBER_LINE_NAME: &str = "hljs-ln-n";
/// Attribute carrying the line number on both cells.
pub const DATA_ATTR_NAME: &str = "data-line-number";

/// One rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedRow<'a> {
    /// `start_from + fragment index`.
    pub line_number: i64,
    /// Markup of the line.
    pub content_html: &'a str,
}

/// Number `fragments` consecutively from `start_from`.
///
/// A start so close to `i64::MAX` that the last row would not fit is lowered until it does.
pub fn numbered_rows<'a>(fragments: &[&'a str], start_from: i64) -> Vec<NumberedRow<'a>> {
    let span = i64::try_from(fragments.len().saturating_sub(1)).unwrap_or(i64::MAX);
    let first = match start_from.checked_add(span) {
        Some(_) => start_from,
        None => i64::MAX - span,
    };
    fragments
        .iter()
        .copied()
        .zip(first..=i64::MAX)
        .map(|(content_html, line_number)| NumberedRow {
            line_number,
            content_html,
        })
        .collect()
}

/// Render `fragments` as a line numbers table.
///
/// With at most one fragment and no `single_line` request there is nothing worth numbering and
/// `input_html` is returned unchanged.
pub fn render_table<'a>(
    input_html: &'a str,
    fragments: &[&str],
    options: &RenderOptions,
) -> Cow<'a, str> {
    if fragments.len() <= 1 && !options.single_line {
        return Cow::Borrowed(input_html);
    }

    let mut html = String::new();
    let _ = write!(html, "<table class=\"{TABLE_NAME}\">");
    for row in numbered_rows(fragments, options.start_from) {
        write_row(&mut html, &row);
    }
    html.push_str("</table>");
    Cow::Owned(html)
}

fn write_row(out: &mut String, row: &NumberedRow<'_>) {
    let n = row.line_number;
    let content = if row.content_html.is_empty() {
        " "
    } else {
        row.content_html
    };
    // The number itself is projected by the `hljs-ln-n:before` style rule so it never becomes
    // part of the selectable text.
    let _ = write!(
        out,
        "<tr>\
         <td class=\"{LINE_NAME} {NUMBERS_BLOCK_NAME}\" {DATA_ATTR_NAME}=\"{n}\">\
         <div class=\"{NUMBER_LINE_NAME}\" {DATA_ATTR_NAME}=\"{n}\"></div>\
         </td>\
         <td class=\"{LINE_NAME} {CODE_BLOCK_NAME}\" {DATA_ATTR_NAME}=\"{n}\">{content}</td>\
         </tr>"
    );
}
