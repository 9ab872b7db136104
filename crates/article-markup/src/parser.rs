//! HTML parsing into the markup tree
//!
//! Rich-text bodies arrive as HTML fragments. html5ever is spec-compliant
//! and recovers from any malformed input, so parsing itself never fails;
//! the only structural failure surfaced here is a depth guard against
//! pathologically nested documents.

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, namespace_url, ns, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{Error, Result};
use crate::node::{Element, Node};

/// Maximum element nesting depth accepted from the parser
const MAX_TREE_DEPTH: usize = 128;

/// Parse an HTML fragment into a markup tree.
///
/// The fragment is parsed in `body` context, so bare inline and block
/// content both work. The returned root is a synthetic `body` element
/// wrapping the fragment's top-level nodes. Comments, doctypes, and
/// processing instructions are dropped.
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] if the tree nests deeper than the
/// engine supports.
pub fn parse_markup(input: &str) -> Result<Node> {
    let dom = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        Vec::new(),
    )
    .one(input);

    // Fragment parsing wraps the content in a single synthetic <html>
    // element under the document node.
    let document = dom.document.children.borrow();
    let fragment_root = document
        .iter()
        .find(|h| matches!(h.data, NodeData::Element { .. }))
        .ok_or_else(|| Error::parse("fragment produced no root element"))?;

    let mut children = Vec::new();
    for child in fragment_root.children.borrow().iter() {
        if let Some(node) = convert(child, 1)? {
            children.push(node);
        }
    }

    Ok(Node::Element(Element {
        tag: "body".to_string(),
        attributes: Default::default(),
        children,
    }))
}

fn convert(handle: &Handle, depth: usize) -> Result<Option<Node>> {
    if depth > MAX_TREE_DEPTH {
        return Err(Error::DepthExceeded {
            max_depth: MAX_TREE_DEPTH,
        });
    }

    match &handle.data {
        NodeData::Text { contents } => Ok(Some(Node::Text(contents.borrow().to_string()))),
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();

            let mut children = Vec::new();
            for child in handle.children.borrow().iter() {
                if let Some(node) = convert(child, depth + 1)? {
                    children.push(node);
                }
            }

            Ok(Some(Node::Element(Element {
                tag: name.local.to_string(),
                attributes,
                children,
            })))
        }
        // Comments, doctypes, and processing instructions carry no content
        NodeData::Comment { .. }
        | NodeData::Doctype { .. }
        | NodeData::ProcessingInstruction { .. }
        | NodeData::Document => Ok(None),
    }
}
