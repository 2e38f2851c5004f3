//! Line splitter: repairs highlighter output so that line boundaries align with tag boundaries.
//!
//! Highlighters wrap whole tokens in styled elements, and a token such as a block comment or a
//! multi-line string may cross several physical lines. Cutting such markup at the line breaks
//! would leave unbalanced tags in every resulting line. The splitter replaces each styled
//! element that crosses a line break with one copy per physical line, each carrying the
//! original attributes (and therefore the original style classes).

use crate::error::MarkupError;
use crate::line_break::{has_line_break, split_lines};
use crate::markup::{Element, MarkupNode, parse_fragment, serialize};
use regex::Regex;

/// Class-name pattern used by highlight.js for styled spans.
pub const DEFAULT_STYLE_CLASS_PATTERN: &str = "hljs-";

/// Rewrites multi-line styled elements into one element per line.
#[derive(Debug, Clone)]
pub struct LineSplitter {
    class_pattern: Regex,
}

impl Default for LineSplitter {
    fn default() -> Self {
        Self {
            class_pattern: Regex::new(DEFAULT_STYLE_CLASS_PATTERN)
                .expect("default style class pattern is valid"),
        }
    }
}

impl LineSplitter {
    /// Create a splitter recognizing highlight.js style classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter recognizing styled elements by a custom class pattern.
    ///
    /// The pattern is matched against the raw `class` attribute.
    pub fn with_class_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            class_pattern: Regex::new(pattern)?,
        })
    }

    /// Returns `true` if `element` carries a recognized style class.
    pub fn is_styled(&self, element: &Element) -> bool {
        element
            .class_name()
            .is_some_and(|class| self.class_pattern.is_match(class))
    }

    /// Parse `html`, split its multi-line styled elements and serialize the result.
    pub fn normalize(&self, html: &str) -> Result<String, MarkupError> {
        let nodes = parse_fragment(html)?;
        Ok(serialize(&self.split(&nodes)))
    }

    /// Return a copy of `nodes` in which no styled element crosses a line break.
    ///
    /// Elements without a recognized style class are kept as they are; only their descendants
    /// are rewritten.
    pub fn split(&self, nodes: &[MarkupNode]) -> Vec<MarkupNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                MarkupNode::Element(el) if has_line_break(&el.raw_text()) => {
                    if self.is_styled(el) {
                        out.extend(split_styled_element(el));
                    } else {
                        out.push(MarkupNode::Element(
                            el.clone_with_children(self.split(&el.children)),
                        ));
                    }
                }
                other => out.push(other.clone()),
            }
        }
        out
    }
}

/// Split a styled element into per-line copies joined by `"\n"`.
///
/// A line that is empty between two breaks keeps a single space so it stays visible and
/// selectable. Empty pieces at either end produce no element.
fn split_styled_element(element: &Element) -> Vec<MarkupNode> {
    let lines = split_into_lines(&element.children);
    let last = lines.len().saturating_sub(1);
    tracing::trace!(
        class = element.class_name().unwrap_or_default(),
        lines = lines.len(),
        "splitting multi-line styled element"
    );

    let mut out = Vec::with_capacity(lines.len() * 2);
    for (index, line) in lines.into_iter().enumerate() {
        if index > 0 {
            out.push(MarkupNode::text("\n"));
        }
        if !line.is_empty() {
            out.push(MarkupNode::Element(element.clone_with_children(line)));
        } else if index != 0 && index != last {
            out.push(MarkupNode::Element(
                element.clone_with_children(vec![MarkupNode::text(" ")]),
            ));
        }
    }
    out
}

/// Distribute `nodes` over physical lines, cloning any element that crosses a break.
fn split_into_lines(nodes: &[MarkupNode]) -> Vec<Vec<MarkupNode>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for node in nodes {
        match node {
            MarkupNode::Text(text) => {
                for (index, piece) in split_lines(text).into_iter().enumerate() {
                    if index > 0 {
                        lines.push(std::mem::take(&mut current));
                    }
                    if !piece.is_empty() {
                        current.push(MarkupNode::text(piece));
                    }
                }
            }
            MarkupNode::Element(el) if has_line_break(&el.raw_text()) => {
                for (index, inner) in split_into_lines(&el.children).into_iter().enumerate() {
                    if index > 0 {
                        lines.push(std::mem::take(&mut current));
                    }
                    if !inner.is_empty() {
                        current.push(MarkupNode::Element(el.clone_with_children(inner)));
                    }
                }
            }
            other => current.push(other.clone()),
        }
    }

    lines.push(current);
    lines
}
