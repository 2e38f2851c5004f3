#![warn(missing_docs)]
//! `hljs-ln` - line numbers for pre-highlighted code blocks.
//!
//! # Overview
//!
//! A syntax highlighter emits a code block as nested styled spans. This crate turns that markup
//! into a two-column table (gutter plus content, one row per physical line) and, in the other
//! direction, recovers the exact plain text of a selection made across such rows.
//!
//! ```text
//! highlighted markup
//!   └─ LineSplitter      one styled element per physical line
//!      └─ line_fragments one markup string per line
//!         └─ render_table  <table class="hljs-ln"> with data-line-number cells
//!
//! selection over the table
//!   └─ selection_span    endpoints mapped to line numbers
//!      └─ resolve        copied plain text
//! ```
//!
//! Everything here is a pure function of its input; nothing touches a live document.
//!
//! # Quick Start
//!
//! ```rust
//! use hljs_ln::{RenderOptions, render_block};
//!
//! let html = "<span class=\"hljs-string\">line1\nline2</span>";
//! let table = render_block(html, &RenderOptions::default()).unwrap();
//!
//! assert!(table.starts_with("<table class=\"hljs-ln\">"));
//! assert!(table.contains("data-line-number=\"2\"><span class=\"hljs-string\">line2</span></td>"));
//!
//! // A single line is left alone.
//! assert_eq!(render_block("x", &RenderOptions::default()).unwrap(), "x");
//! ```
//!
//! # Module Description
//!
//! - [`markup`] - minimal markup tree (parse / serialize / text content)
//! - [`line_break`] - line break pattern helpers
//! - [`splitter`] - rewrites multi-line styled elements into one element per line
//! - [`fragments`] - per-line markup extraction
//! - [`table`] - row rendering and class / attribute names
//! - [`options`] - caller configuration and per-block resolution
//! - [`style`] - global style rules and one-time injection
//! - [`selection`] - copied text reconstruction
//! - [`table_view`] - selection endpoints over a rendered table tree

pub mod error;
pub mod fragments;
pub mod line_break;
pub mod markup;
pub mod options;
mod render;
pub mod selection;
pub mod splitter;
pub mod style;
pub mod table;
pub mod table_view;

pub use error::{LineNumbersError, MarkupError, SelectionError};
pub use fragments::line_fragments;
pub use markup::{Attribute, Element, MarkupNode, parse_fragment, serialize};
pub use options::{LineNumbersConfig, RenderOptions, START_FROM_ATTR_NAME};
pub use render::{line_numbers_value, render_block, render_block_with};
pub use selection::{LineLookup, SelectionSpan, resolve};
pub use splitter::LineSplitter;
pub use style::{GLOBAL_STYLE_RULES, StyleInjector, style_element};
pub use table::{
    CODE_BLOCK_NAME, DATA_ATTR_NAME, LINE_NAME, NUMBER_LINE_NAME, NUMBERS_BLOCK_NAME, NumberedRow,
    TABLE_NAME, numbered_rows, render_table,
};
pub use table_view::{
    NodePath, TableLines, TreeSelection, copied_text, is_code_cell_descendant, selection_span,
};
