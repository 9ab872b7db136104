//! List rules
//!
//! The container rule handles block separation (blank lines around a
//! top-level list, a bare line break for a list nested in an item); the
//! item rule carries marker selection, nesting indentation, and the
//! trailing line break between siblings.

use crate::node::Node;
use crate::rule::{RenderContext, RenderRule};

/// `ul` / `ol` render as items separated from surrounding prose
pub struct ListRule;

impl RenderRule for ListRule {
    fn id(&self) -> &'static str {
        "list"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("ul") || node.is_tag("ol")
    }

    fn render(&self, _node: &Node, children: &str, cx: &RenderContext<'_>) -> String {
        let content = children.trim_matches('\n');
        if cx.nearest("li").is_some() {
            // Nested list: break off the parent item's line, no blank line
            format!("\n{content}")
        } else {
            format!("\n\n{content}\n\n")
        }
    }
}

/// `li` renders as a marker-prefixed item with nested content re-indented
pub struct ListItemRule;

impl RenderRule for ListItemRule {
    fn id(&self) -> &'static str {
        "list-item"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("li")
    }

    fn render(&self, _node: &Node, children: &str, cx: &RenderContext<'_>) -> String {
        let options = cx.options();

        // Strip the blank lines block children introduce, then re-indent
        // internal line breaks so multi-line content nests under the marker.
        let content = children.trim();
        let indented = content.replace('\n', &format!("\n{}", options.indent));

        // Ordered lists number by sibling position; everything else uses
        // the configured bullet.
        let marker = match cx.parent() {
            Some(parent) if parent.tag == "ol" => format!("{}.", cx.index() + 1),
            _ => options.bullet.clone(),
        };

        let mut out = format!("{marker} {indented}");
        if cx.has_next_sibling() && !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}
