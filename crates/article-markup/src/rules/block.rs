//! Block-level rules: headings, paragraphs, blockquotes, thematic breaks

use crate::engine::collapse_blank_lines;
use crate::node::Node;
use crate::rule::{RenderContext, RenderRule};

/// `h1` through `h6` render as ATX headings
pub struct HeadingRule;

impl HeadingRule {
    fn level(tag: &str) -> Option<usize> {
        match tag {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }
}

impl RenderRule for HeadingRule {
    fn id(&self) -> &'static str {
        "heading"
    }

    fn matches(&self, node: &Node) -> bool {
        node.as_element()
            .is_some_and(|el| Self::level(&el.tag).is_some())
    }

    fn render(&self, node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        let level = node
            .as_element()
            .and_then(|el| Self::level(&el.tag))
            .unwrap_or(1);
        format!("\n\n{} {}\n\n", "#".repeat(level), children.trim())
    }
}

/// `p` renders as content wrapped in blank lines
pub struct ParagraphRule;

impl RenderRule for ParagraphRule {
    fn id(&self) -> &'static str {
        "paragraph"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("p")
    }

    fn render(&self, _node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        format!("\n\n{}\n\n", children.trim())
    }
}

/// `blockquote` renders with every line prefixed with `> `
pub struct BlockquoteRule;

impl RenderRule for BlockquoteRule {
    fn id(&self) -> &'static str {
        "blockquote"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("blockquote")
    }

    fn render(&self, _node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        // Collapse inner block spacing before prefixing, so quoted
        // paragraphs are separated by a single `>` line.
        let quoted = collapse_blank_lines(children.trim())
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("\n\n{quoted}\n\n")
    }
}

/// `hr` renders as a thematic break
pub struct ThematicBreakRule;

impl RenderRule for ThematicBreakRule {
    fn id(&self) -> &'static str {
        "thematic-break"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("hr")
    }

    fn render(&self, _node: &Node, _children: &str, _cx: &RenderContext<'_>) -> String {
        "\n\n---\n\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Transducer;

    fn transduce(html: &str) -> String {
        Transducer::default().transduce_str(html).unwrap()
    }

    #[test]
    fn heading_levels() {
        assert_eq!(transduce("<h1>Title</h1>"), "# Title");
        assert_eq!(transduce("<h3>Sub</h3>"), "### Sub");
    }

    #[test]
    fn paragraphs_are_separated_by_blank_lines() {
        assert_eq!(transduce("<p>one</p><p>two</p>"), "one\n\ntwo");
    }

    #[test]
    fn blockquote_prefixes_every_line() {
        assert_eq!(
            transduce("<blockquote><p>a</p><p>b</p></blockquote>"),
            "> a\n>\n> b"
        );
    }

    #[test]
    fn thematic_break_renders_dashes() {
        assert_eq!(transduce("<p>a</p><hr><p>b</p>"), "a\n\n---\n\nb");
    }
}
