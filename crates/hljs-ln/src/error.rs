use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while reading or rewriting highlighted markup.
pub enum MarkupError {
    #[error("markup tokenizer error: {0}")]
    /// The tokenizer rejected the input.
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    /// An attribute could not be read.
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("markup is not valid UTF-8: {0}")]
    /// A tag name, attribute or text run was not valid UTF-8.
    Utf8(#[from] std::str::Utf8Error),

    #[error("closing tag </{found}> does not match open element <{expected}>")]
    /// A closing tag does not match the innermost open element.
    MismatchedEnd {
        /// Tag name of the innermost open element.
        expected: String,
        /// Tag name found in the closing tag.
        found: String,
    },

    #[error("closing tag </{0}> without an open element")]
    /// A closing tag appeared at the top level.
    UnexpectedEnd(String),

    #[error("element <{0}> is never closed")]
    /// The input ended while an element was still open.
    Unclosed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while mapping a selection back onto rendered line cells.
pub enum SelectionError {
    #[error("selection endpoint does not address a node")]
    /// A node path points outside the tree.
    InvalidPath,

    #[error("selection endpoint is not inside a line content cell")]
    /// A selection endpoint has no enclosing content cell.
    NoEnclosingCell,

    #[error("line cell has no data-line-number attribute")]
    /// The enclosing content cell does not carry a line number.
    MissingLineNumber,

    #[error("line cell carries an invalid line number '{0}'")]
    /// The line number attribute does not parse.
    InvalidLineNumber(String),

    #[error("line cell is not inside a line numbers table")]
    /// The content cell has no enclosing table.
    NoEnclosingTable,

    #[error("no content cell for line {0}")]
    /// A line strictly between the selection endpoints could not be found.
    MissingLine(i64),
}

#[derive(Debug, Error)]
/// Top-level error for the line numbering entry points.
pub enum LineNumbersError {
    #[error(transparent)]
    /// Markup could not be parsed or rewritten.
    Markup(#[from] MarkupError),

    #[error(transparent)]
    /// A selection could not be resolved.
    Selection(#[from] SelectionError),
}
