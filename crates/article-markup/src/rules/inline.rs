//! Inline rules: emphasis, links, line breaks, code spans, strikethrough

use crate::node::Node;
use crate::rule::{RenderContext, RenderRule};

/// `b` / `strong` render as `**content**`
///
/// Content is trimmed before the delimiters are applied: `<b> text </b>`
/// must yield `**text**`, never `** text **`, which most renderers treat
/// as literal asterisks.
pub struct StrongRule;

impl RenderRule for StrongRule {
    fn id(&self) -> &'static str {
        "strong"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("b") || node.is_tag("strong")
    }

    fn render(&self, _node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        let content = children.trim();
        if content.is_empty() {
            String::new()
        } else {
            format!("**{content}**")
        }
    }
}

/// `i` / `em` render as `*content*`, trimmed the same way as bold
pub struct EmphasisRule;

impl RenderRule for EmphasisRule {
    fn id(&self) -> &'static str {
        "emphasis"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("i") || node.is_tag("em")
    }

    fn render(&self, _node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        let content = children.trim();
        if content.is_empty() {
            String::new()
        } else {
            format!("*{content}*")
        }
    }
}

/// `s` / `del` / `strike` render as `~~content~~`
pub struct StrikethroughRule;

impl RenderRule for StrikethroughRule {
    fn id(&self) -> &'static str {
        "strikethrough"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("s") || node.is_tag("del") || node.is_tag("strike")
    }

    fn render(&self, _node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        let content = children.trim();
        if content.is_empty() {
            String::new()
        } else {
            format!("~~{content}~~")
        }
    }
}

/// `a` renders as `[text](href)`; without an href the link degrades to its text
pub struct LinkRule;

impl RenderRule for LinkRule {
    fn id(&self) -> &'static str {
        "link"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("a")
    }

    fn render(&self, node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        let el = match node.as_element() {
            Some(el) => el,
            None => return children.to_string(),
        };
        match el.attr("href") {
            Some(href) if !href.is_empty() => match el.attr("title") {
                Some(title) if !title.is_empty() => {
                    format!("[{children}]({href} \"{title}\")")
                }
                _ => format!("[{children}]({href})"),
            },
            _ => children.to_string(),
        }
    }
}

/// `br` renders as a line break
pub struct LineBreakRule;

impl RenderRule for LineBreakRule {
    fn id(&self) -> &'static str {
        "line-break"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("br")
    }

    fn render(&self, _node: &Node, _children: &str, _cx: &RenderContext<'_>) -> String {
        "\n".to_string()
    }
}

/// `code` renders as a backtick span, using the literal text content
///
/// Fenced blocks are handled one level up by the `pre` rule; a `code`
/// element reached directly is an inline span. The literal text is used
/// so code content is never markdown-escaped.
pub struct InlineCodeRule;

impl RenderRule for InlineCodeRule {
    fn id(&self) -> &'static str {
        "inline-code"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("code")
    }

    fn render(&self, node: &Node, _children: &str, _cx: &RenderContext<'_>) -> String {
        let content = node.text_content();
        if content.contains('`') {
            format!("`` {content} ``")
        } else {
            format!("`{content}`")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Transducer;
    use rstest::rstest;

    fn transduce(html: &str) -> String {
        Transducer::default().transduce_str(html).unwrap()
    }

    #[rstest]
    #[case("<b> text </b>", "**text**")]
    #[case("<strong>text</strong>", "**text**")]
    #[case("<em> text </em>", "*text*")]
    #[case("<i>text</i>", "*text*")]
    #[case("<del>gone</del>", "~~gone~~")]
    fn emphasis_trims_before_delimiting(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(transduce(html), expected);
    }

    #[test]
    fn empty_emphasis_renders_nothing() {
        assert_eq!(transduce("<p>a<b> </b>b</p>"), "ab");
    }

    #[test]
    fn link_with_href() {
        assert_eq!(
            transduce(r#"<a href="https://example.com">here</a>"#),
            "[here](https://example.com)"
        );
    }

    #[test]
    fn link_without_href_degrades_to_text() {
        assert_eq!(transduce("<a>here</a>"), "here");
    }

    #[test]
    fn link_with_title() {
        assert_eq!(
            transduce(r#"<a href="/x" title="T">y</a>"#),
            "[y](/x \"T\")"
        );
    }

    #[test]
    fn inline_code_keeps_literal_text() {
        assert_eq!(transduce("<p>run <code>a*b</code></p>"), "run `a*b`");
    }

    #[test]
    fn inline_code_with_backticks_uses_double_fence() {
        assert_eq!(transduce("<p><code>a`b</code></p>"), "`` a`b ``");
    }

    #[test]
    fn line_break_splits_line() {
        assert_eq!(transduce("<p>a<br>b</p>"), "a\nb");
    }
}
