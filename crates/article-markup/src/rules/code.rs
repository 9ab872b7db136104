//! Fenced code block rule

use crate::node::Node;
use crate::rule::{RenderContext, RenderRule};

/// `pre` renders as a fenced block with the literal text emitted verbatim
///
/// The rendered children are discarded: a code block's content must not
/// pass through markdown escaping or inline rules. The fence language is
/// taken from a `language-<lang>` class token on the inner code element
/// when present.
pub struct FencedCodeRule;

impl RenderRule for FencedCodeRule {
    fn id(&self) -> &'static str {
        "fenced-code"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("pre")
    }

    fn render(&self, node: &Node, _children: &str, _cx: &RenderContext<'_>) -> String {
        let Some(pre) = node.as_element() else {
            return String::new();
        };

        let inner = pre.first_element_child();
        let language = inner
            .and_then(|el| el.class_suffix("language-"))
            .unwrap_or("");
        let literal = match inner {
            Some(el) if el.tag == "code" => {
                let mut text = String::new();
                for child in &el.children {
                    text.push_str(&child.text_content());
                }
                text
            }
            _ => node.text_content(),
        };
        let literal = literal.trim_matches('\n');

        format!("\n\n```{language}\n{literal}\n```\n\n")
    }
}
