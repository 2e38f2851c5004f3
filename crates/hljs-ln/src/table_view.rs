//! Selection boundary over a rendered table held as a markup tree.
//!
//! A live selection names its endpoints as nodes. Here a node is addressed by a [`NodePath`]
//! from the root node list, so its ancestors are the prefixes of that path.

use crate::error::SelectionError;
use crate::markup::{Element, MarkupNode};
use crate::selection::{LineLookup, SelectionSpan, resolve};
use crate::table::{CODE_BLOCK_NAME, DATA_ATTR_NAME};

/// Child-index path from the root node list to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Create a path from child indices, outermost first.
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The path of this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Child indices, outermost first.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// A selection over a markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSelection {
    /// Node where the selection started.
    pub anchor: NodePath,
    /// Node where the selection ended.
    pub focus: NodePath,
    /// The selection's plain-text serialization.
    pub text: String,
}

impl TreeSelection {
    /// Create a selection.
    pub fn new(
        anchor: impl Into<NodePath>,
        focus: impl Into<NodePath>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            anchor: anchor.into(),
            focus: focus.into(),
            text: text.into(),
        }
    }
}

/// Content cells of one rendered table.
#[derive(Debug, Clone, Copy)]
pub struct TableLines<'a> {
    table: &'a Element,
}

impl<'a> TableLines<'a> {
    /// Wrap a rendered `<table>` element.
    pub fn new(table: &'a Element) -> Self {
        Self { table }
    }

    /// The content cell for `line_number`, if any.
    pub fn code_cell(&self, line_number: i64) -> Option<&'a Element> {
        find_code_cell(&self.table.children, line_number)
    }
}

impl LineLookup for TableLines<'_> {
    fn line_text(&self, line_number: i64) -> Option<String> {
        self.code_cell(line_number).map(Element::text_content)
    }
}

fn find_code_cell(nodes: &[MarkupNode], line_number: i64) -> Option<&Element> {
    nodes.iter().find_map(|node| {
        let el = node.as_element()?;
        if is_code_cell(el) && cell_line_number(el).ok() == Some(line_number) {
            Some(el)
        } else {
            find_code_cell(&el.children, line_number)
        }
    })
}

fn is_code_cell(element: &Element) -> bool {
    element.is_tag("td") && element.has_class(CODE_BLOCK_NAME)
}

fn cell_line_number(cell: &Element) -> Result<i64, SelectionError> {
    let value = cell
        .attribute(DATA_ATTR_NAME)
        .ok_or(SelectionError::MissingLineNumber)?;
    value
        .trim()
        .parse()
        .map_err(|_| SelectionError::InvalidLineNumber(value.to_string()))
}

/// Nodes from the outermost ancestor down to the node at `path`.
fn node_chain<'a>(
    root: &'a [MarkupNode],
    path: &NodePath,
) -> Result<Vec<&'a MarkupNode>, SelectionError> {
    let mut chain = Vec::with_capacity(path.indices().len());
    let mut siblings = root;
    for &index in path.indices() {
        let node = siblings.get(index).ok_or(SelectionError::InvalidPath)?;
        chain.push(node);
        siblings = node.children();
    }
    if chain.is_empty() {
        return Err(SelectionError::InvalidPath);
    }
    Ok(chain)
}

/// Innermost content cell in `chain`, with its depth.
fn enclosing_code_cell<'a>(chain: &[&'a MarkupNode]) -> Option<(usize, &'a Element)> {
    chain
        .iter()
        .copied()
        .enumerate()
        .rev()
        .find_map(|(depth, node)| {
            node.as_element()
                .filter(|el| is_code_cell(el))
                .map(|el| (depth, el))
        })
}

/// Returns `true` if the node at `path` lies inside a content cell.
pub fn is_code_cell_descendant(root: &[MarkupNode], path: &NodePath) -> bool {
    node_chain(root, path).is_ok_and(|chain| enclosing_code_cell(&chain).is_some())
}

/// Map `selection` onto line numbers and return it with a lookup over the enclosing table.
pub fn selection_span<'a>(
    root: &'a [MarkupNode],
    selection: &TreeSelection,
) -> Result<(SelectionSpan, TableLines<'a>), SelectionError> {
    let anchor_chain = node_chain(root, &selection.anchor)?;
    let focus_chain = node_chain(root, &selection.focus)?;

    let (anchor_depth, anchor_cell) =
        enclosing_code_cell(&anchor_chain).ok_or(SelectionError::NoEnclosingCell)?;
    let (_, focus_cell) =
        enclosing_code_cell(&focus_chain).ok_or(SelectionError::NoEnclosingCell)?;

    let table = anchor_chain[..anchor_depth]
        .iter()
        .copied()
        .rev()
        .find_map(|node| node.as_element().filter(|el| el.is_tag("table")))
        .ok_or(SelectionError::NoEnclosingTable)?;

    let span = SelectionSpan {
        anchor_line: cell_line_number(anchor_cell)?,
        focus_line: cell_line_number(focus_cell)?,
        anchor_text: anchor_cell.text_content(),
        focus_text: focus_cell.text_content(),
        raw_selection: selection.text.clone(),
    };
    Ok((span, TableLines::new(table)))
}

/// The text to put on the clipboard for `selection`.
///
/// Returns `Ok(None)` when the anchor is not inside a content cell, in which case the default
/// copy behavior applies.
pub fn copied_text(
    root: &[MarkupNode],
    selection: &TreeSelection,
) -> Result<Option<String>, SelectionError> {
    if !is_code_cell_descendant(root, &selection.anchor) {
        return Ok(None);
    }
    let (span, lines) = selection_span(root, selection)?;
    resolve(&span, &lines).map(Some)
}
