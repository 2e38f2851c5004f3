//! Minimal structural markup tree.
//!
//! Highlighter output is treated as an opaque nest of tags around text. This module reads it into
//! a small owned tree (`tag`, attributes, children or text) and writes it back without touching
//! anything the line numbering does not need to change: text keeps its original escaping and
//! attributes keep their order.

use crate::error::MarkupError;
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// HTML elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void_tag(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// A single attribute, value kept as written (still escaped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Raw attribute value. Valueless attributes have an empty value.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written.
    pub tag: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Child nodes.
    pub children: Vec<MarkupNode>,
    /// Whether the element was written as `<tag/>`.
    pub self_closing: bool,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Builder-style children setter.
    pub fn with_children(mut self, children: Vec<MarkupNode>) -> Self {
        self.children = children;
        self
    }

    /// A copy of this element (same tag and attributes) holding `children` instead.
    pub fn clone_with_children(&self, children: Vec<MarkupNode>) -> Self {
        Self {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            children,
            self_closing: self.self_closing,
        }
    }

    /// Look up an attribute value by (ASCII case-insensitive) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// The raw `class` attribute, if any.
    pub fn class_name(&self) -> Option<&str> {
        self.attribute("class")
    }

    /// Whitespace-separated class list.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_name().unwrap_or_default().split_whitespace()
    }

    /// Returns `true` if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Returns `true` for HTML void elements (`br`, `img`, ...).
    pub fn is_void(&self) -> bool {
        is_void_tag(&self.tag)
    }

    /// Returns `true` if the tag name matches (ASCII case-insensitive).
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Descendant text with character references decoded, like the DOM's `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text_content(&mut out);
        }
        out
    }

    /// Descendant text exactly as written in the markup.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_raw_text(&mut out);
        }
        out
    }

    /// Serialized children.
    pub fn inner_html(&self) -> String {
        serialize(&self.children)
    }

    /// Serialized element including its own tags.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for attr in &self.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            out.push_str(&attr.value.replace('"', "&quot;"));
            out.push('"');
        }
        if self.self_closing {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// An element with attributes and children.
    Element(Element),
    /// A text run, still escaped as in the source.
    Text(String),
    /// Comments, CDATA sections, doctype and processing instructions, verbatim.
    Raw(String),
}

impl MarkupNode {
    /// Create a text node from already-escaped markup text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Child nodes (empty for text and raw nodes).
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            Self::Element(el) => &el.children,
            _ => &[],
        }
    }

    /// Text with character references decoded.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text_content(&mut out);
        out
    }

    /// Text exactly as written in the markup.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        self.collect_raw_text(&mut out);
        out
    }

    fn collect_text_content(&self, out: &mut String) {
        match self {
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text_content(out);
                }
            }
            Self::Text(text) => match unescape_with(text, resolve_html5_entity) {
                Ok(decoded) => out.push_str(&decoded),
                Err(_) => out.push_str(text),
            },
            Self::Raw(_) => {}
        }
    }

    fn collect_raw_text(&self, out: &mut String) {
        match self {
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_raw_text(out);
                }
            }
            Self::Text(text) => out.push_str(text),
            Self::Raw(_) => {}
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Element(el) => el.write_to(out),
            Self::Text(text) | Self::Raw(text) => out.push_str(text),
        }
    }
}

/// Serialize a node list back to markup.
pub fn serialize(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_to(&mut out);
    }
    out
}

/// Parse an HTML fragment into a node list.
///
/// Unbalanced markup is an error: a closing tag must match the innermost open element and every
/// non-void element must be closed before the end of input.
pub fn parse_fragment(html: &str) -> Result<Vec<MarkupNode>, MarkupError> {
    let mut reader = Reader::from_str(html);
    {
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;
    }

    let mut builder = TreeBuilder::default();
    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event()?;
        let end = reader.buffer_position() as usize;
        let source = html.get(start..end).unwrap_or_default();

        match event {
            Event::Start(e) => builder.open(element_from_start(&e, false)?),
            Event::Empty(e) => builder.push(MarkupNode::Element(element_from_start(&e, true)?)),
            Event::End(e) => builder.close(std::str::from_utf8(e.name().as_ref())?)?,
            Event::Text(_) | Event::GeneralRef(_) => builder.push_text(source),
            Event::Eof => break,
            _ => builder.push(MarkupNode::Raw(source.to_string())),
        }
    }
    builder.finish()
}

fn element_from_start(start: &BytesStart<'_>, self_closing: bool) -> Result<Element, MarkupError> {
    let mut element = Element::new(std::str::from_utf8(start.name().as_ref())?);
    element.self_closing = self_closing;
    for attr in start.html_attributes() {
        let attr = attr?;
        element.attributes.push(Attribute::new(
            std::str::from_utf8(attr.key.as_ref())?,
            std::str::from_utf8(&attr.value)?,
        ));
    }
    Ok(element)
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<MarkupNode>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn children_mut(&mut self) -> &mut Vec<MarkupNode> {
        match self.open.last_mut() {
            Some(el) => &mut el.children,
            None => &mut self.root,
        }
    }

    fn push(&mut self, node: MarkupNode) {
        self.children_mut().push(node);
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let children = self.children_mut();
        if let Some(MarkupNode::Text(last)) = children.last_mut() {
            last.push_str(text);
        } else {
            children.push(MarkupNode::Text(text.to_string()));
        }
    }

    fn open(&mut self, element: Element) {
        if element.is_void() {
            self.push(MarkupNode::Element(element));
        } else {
            self.open.push(element);
        }
    }

    fn close(&mut self, tag: &str) -> Result<(), MarkupError> {
        // `</br>` and friends carry no structure.
        if is_void_tag(tag) {
            return Ok(());
        }
        let Some(element) = self.open.pop() else {
            return Err(MarkupError::UnexpectedEnd(tag.to_string()));
        };
        if !element.is_tag(tag) {
            return Err(MarkupError::MismatchedEnd {
                expected: element.tag,
                found: tag.to_string(),
            });
        }
        self.push(MarkupNode::Element(element));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<MarkupNode>, MarkupError> {
        if let Some(element) = self.open.pop() {
            return Err(MarkupError::Unclosed(element.tag));
        }
        Ok(self.root)
    }
}
