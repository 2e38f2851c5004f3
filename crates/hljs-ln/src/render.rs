//! Block rendering: splitter, fragment extraction and table rendering in one pure call.

use crate::error::MarkupError;
use crate::fragments::line_fragments;
use crate::line_break::{has_line_break, line_break_count};
use crate::options::{LineNumbersConfig, RenderOptions};
use crate::splitter::LineSplitter;
use crate::table::render_table;

/// Render line numbers for the inner markup of one code block.
///
/// Returns `html` byte-for-byte when the block has at most one line and `single_line` is not
/// set.
pub fn render_block(html: &str, options: &RenderOptions) -> Result<String, MarkupError> {
    render_block_with(&LineSplitter::default(), html, options)
}

/// Like [`render_block`], with a custom [`LineSplitter`].
pub fn render_block_with(
    splitter: &LineSplitter,
    html: &str,
    options: &RenderOptions,
) -> Result<String, MarkupError> {
    if !options.single_line && !has_line_break(html) {
        return Ok(html.to_string());
    }

    let normalized = splitter.normalize(html)?;
    let fragments = line_fragments(&normalized);
    let rendered = render_table(html, &fragments, options);
    tracing::debug!(
        rows = fragments.len(),
        breaks = line_break_count(html),
        start_from = options.start_from,
        single_line = options.single_line,
        "rendered code block"
    );
    Ok(rendered.into_owned())
}

/// Render line numbers for a markup string with no owning element.
///
/// Without an element there is no per-element `start_from` override.
pub fn line_numbers_value(html: &str, config: &LineNumbersConfig) -> Result<String, MarkupError> {
    render_block(html, &RenderOptions::resolve(None, config))
}
