#![warn(missing_docs)]
//! `hljs-ln-document` - line numbering applied to whole HTML documents.
//!
//! [`LineNumbers::document_ready`] finds every `code.hljs` / `code.nohighlight` block, skips the
//! ones marked `nohljsln`, and hands each remaining block to a [`Scheduler`] as its own render
//! task. The task renders the block with [`hljs_ln::render_block_with`] and replaces its contents
//! in one assignment.
//!
//! ```rust
//! use hljs_ln::{LineNumbersConfig, StyleInjector};
//! use hljs_ln_document::{DeferredQueue, HtmlDocument, LineNumbers};
//!
//! let mut doc = HtmlDocument::new(
//!     "<html><head></head><body><pre><code class=\"hljs\">a\nb</code></pre></body></html>",
//! );
//! let plugin = LineNumbers::new(LineNumbersConfig::default());
//! plugin.add_styles(&mut doc, &StyleInjector::new());
//!
//! let mut queue = DeferredQueue::new();
//! plugin.document_ready(&mut doc, &mut queue);
//! assert!(queue.run_until_idle().is_empty());
//!
//! let html = doc.to_html();
//! assert!(html.contains("<style type=\"text/css\">.hljs-ln{"));
//! assert!(html.contains("data-line-number=\"2\""));
//! ```

pub mod document;
pub mod error;
pub mod plugin;
pub mod scheduler;

pub use document::{BlockHandle, CANDIDATE_CLASSES, CodeBlock, HtmlDocument, OPT_OUT_CLASS};
pub use error::DocumentError;
pub use plugin::LineNumbers;
pub use scheduler::{DeferredQueue, RenderTask, Scheduler};
