//! Markup tree model
//!
//! A parsed document is an immutable tree of [`Node`] values. The tree is
//! built once per input document and never mutated during transduction,
//! which keeps one engine instance safe to reuse across documents.

use std::collections::BTreeMap;

/// A single node in the markup tree: an element or a run of text.
///
/// Text nodes carry no children; element nodes carry an ordered child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element node: tag name, attributes, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Lowercased tag name (e.g. "p", "table")
    pub tag: String,
    /// Attribute name to value
    pub attributes: BTreeMap<String, String>,
    /// Children in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Check whether the `class` attribute contains `token` as a
    /// whitespace-separated class name
    pub fn has_class(&self, token: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == token))
    }

    /// Find the first class token with the given prefix and return the rest
    ///
    /// Used to pull the language out of `language-rust` style tokens on
    /// code elements.
    pub fn class_suffix(&self, prefix: &str) -> Option<&str> {
        self.attr("class")?
            .split_whitespace()
            .find_map(|c| c.strip_prefix(prefix))
    }

    /// First child that is an element, if any
    pub fn first_element_child(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Number of children that are elements
    pub fn element_child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_element()).count()
    }
}

impl Node {
    /// Create an element node
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Element(Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children,
        })
    }

    /// Create an element node with attributes
    pub fn element_with_attrs(
        tag: impl Into<String>,
        attributes: impl IntoIterator<Item = (String, String)>,
        children: Vec<Node>,
    ) -> Self {
        Self::Element(Element {
            tag: tag.into(),
            attributes: attributes.into_iter().collect(),
            children,
        })
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// View this node as an element, if it is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// True for an element node with the given tag name
    pub fn is_tag(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|el| el.tag == tag)
    }

    /// Concatenated text content of this node and all descendants,
    /// in document order, without any rendering applied
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(el) => {
            for child in &el.children {
                collect_text(child, out);
            }
        }
    }
}
