//! HTML documents and the code blocks they contain.
//!
//! Only the candidate `<code>` elements are carved out of the document; all other markup is kept
//! as opaque text and written back unchanged.

use crate::error::DocumentError;
use hljs_ln::{Attribute, style_element};
use regex::Regex;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

/// Classes marking a `<code>` element as a highlighted block.
pub const CANDIDATE_CLASSES: &[&str] = &["hljs", "nohighlight"];

/// Class that opts a block out of line numbering.
pub const OPT_OUT_CLASS: &str = "nohljsln";

static CODE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<code(?:\s[^>]*)?>").expect("code open pattern is valid"));

static CODE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</code\s*>").expect("code close pattern is valid"));

static HEAD_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head\s*>").expect("head close pattern is valid"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute pattern is valid")
});

/// One candidate `<code>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    index: usize,
    attributes: Vec<Attribute>,
    inner_html: String,
}

/// Shared handle to a block; render tasks hold one while the document keeps another.
pub type BlockHandle = Rc<RefCell<CodeBlock>>;

impl CodeBlock {
    /// Create a block from its attributes and inner markup.
    pub fn new(index: usize, attributes: Vec<Attribute>, inner_html: impl Into<String>) -> Self {
        Self {
            index,
            attributes,
            inner_html: inner_html.into(),
        }
    }

    /// Position among the document's candidate blocks.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Attributes of the `<code>` tag.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by (ASCII case-insensitive) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Whitespace-separated class list.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or_default().split_whitespace()
    }

    /// Returns `true` if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Returns `true` if the block carries the opt-out class.
    pub fn is_disabled(&self) -> bool {
        self.has_class(OPT_OUT_CLASS)
    }

    /// Current inner markup.
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Replace the inner markup.
    pub fn set_inner_html(&mut self, html: String) {
        self.inner_html = html;
    }
}

#[derive(Debug)]
enum Segment {
    Markup(String),
    Block(BlockHandle),
}

/// An HTML document whose candidate code blocks can be rewritten independently.
#[derive(Debug)]
pub struct HtmlDocument {
    segments: Vec<Segment>,
    blocks: Option<Vec<BlockHandle>>,
}

impl HtmlDocument {
    /// Wrap document markup. Code blocks are located on first use.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Markup(html.into())],
            blocks: None,
        }
    }

    /// Candidate code blocks (`code.hljs`, `code.nohighlight`) in document order.
    pub fn code_blocks(&mut self) -> Result<Vec<BlockHandle>, DocumentError> {
        if let Some(blocks) = &self.blocks {
            return Ok(blocks.clone());
        }

        let mut segments = Vec::with_capacity(self.segments.len());
        let mut blocks = Vec::new();
        for segment in std::mem::take(&mut self.segments) {
            match segment {
                Segment::Markup(text) => carve_code_blocks(&text, &mut segments, &mut blocks)?,
                block => segments.push(block),
            }
        }
        tracing::debug!(blocks = blocks.len(), "located code blocks");

        self.segments = segments;
        self.blocks = Some(blocks.clone());
        Ok(blocks)
    }

    /// Insert a `<style>` element with `css` before `</head>`, or at the very start when the
    /// document has no head.
    pub fn inject_style(&mut self, css: &str) {
        let style = style_element(css);
        for segment in &mut self.segments {
            if let Segment::Markup(text) = segment
                && let Some(head_close) = HEAD_CLOSE.find(text)
            {
                text.insert_str(head_close.start(), &style);
                return;
            }
        }
        self.segments.insert(0, Segment::Markup(style));
    }

    /// The document markup with the current contents of every block.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Markup(text) => out.push_str(text),
                Segment::Block(block) => out.push_str(block.borrow().inner_html()),
            }
        }
        out
    }
}

fn carve_code_blocks(
    text: &str,
    segments: &mut Vec<Segment>,
    blocks: &mut Vec<BlockHandle>,
) -> Result<(), DocumentError> {
    let mut copied_up_to = 0;
    let mut search_from = 0;

    while let Some(open) = CODE_OPEN.find_at(text, search_from) {
        search_from = open.end();
        let attributes = parse_attributes(open.as_str());
        let is_candidate = attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case("class"))
            .is_some_and(|class| {
                class
                    .value
                    .split_whitespace()
                    .any(|c| CANDIDATE_CLASSES.contains(&c))
            });
        if !is_candidate {
            continue;
        }

        let close = CODE_CLOSE
            .find_at(text, open.end())
            .ok_or(DocumentError::UnclosedCodeBlock {
                offset: open.start(),
            })?;

        segments.push(Segment::Markup(text[copied_up_to..open.end()].to_string()));
        let block = Rc::new(RefCell::new(CodeBlock::new(
            blocks.len(),
            attributes,
            &text[open.end()..close.start()],
        )));
        segments.push(Segment::Block(Rc::clone(&block)));
        blocks.push(block);

        copied_up_to = close.start();
        search_from = close.end();
    }

    segments.push(Segment::Markup(text[copied_up_to..].to_string()));
    Ok(())
}

/// Attributes of an opening tag such as `<code class="hljs" data-ln-start-from=3>`.
fn parse_attributes(open_tag: &str) -> Vec<Attribute> {
    let body = open_tag
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim_end_matches('/');
    let body = body.get(4..).unwrap_or_default(); // skip the tag name

    ATTRIBUTE
        .captures_iter(body)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            Some(Attribute::new(name, value))
        })
        .collect()
}
