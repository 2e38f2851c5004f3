use hljs_ln::MarkupError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while numbering the code blocks of a document.
pub enum DocumentError {
    #[error("<code> element opened at byte {offset} is never closed")]
    /// A candidate `<code>` element has no closing tag.
    UnclosedCodeBlock {
        /// Byte offset of the opening tag.
        offset: usize,
    },

    #[error("code block {index} could not be rendered: {source}")]
    /// Rendering one block failed.
    Render {
        /// Position of the block among the document's code blocks.
        index: usize,
        /// The underlying markup error.
        #[source]
        source: MarkupError,
    },

    #[error("code block is borrowed elsewhere while its render runs")]
    /// A block handle was borrowed by someone else when its render task ran.
    BlockBusy,
}
