//! Image rule

use crate::node::Node;
use crate::rule::{RenderContext, RenderRule};

/// `img` renders as `![alt](src "title")`
///
/// The title (and its surrounding space) is omitted when absent. An image
/// with no source renders as nothing at all.
pub struct ImageRule;

impl RenderRule for ImageRule {
    fn id(&self) -> &'static str {
        "image"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("img")
    }

    fn render(&self, node: &Node, _children: &str, _cx: &RenderContext<'_>) -> String {
        let Some(el) = node.as_element() else {
            return String::new();
        };
        let src = match el.attr("src") {
            Some(src) if !src.is_empty() => src,
            _ => return String::new(),
        };
        let alt = el.attr("alt").unwrap_or("");
        match el.attr("title") {
            Some(title) if !title.is_empty() => format!("![{alt}]({src} \"{title}\")"),
            _ => format!("![{alt}]({src})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Transducer;

    fn transduce(html: &str) -> String {
        Transducer::default().transduce_str(html).unwrap()
    }

    #[test]
    fn image_with_title() {
        assert_eq!(
            transduce(r#"<img src="a.png" alt="A" title="T">"#),
            "![A](a.png \"T\")"
        );
    }

    #[test]
    fn image_without_title_omits_the_title_clause() {
        assert_eq!(transduce(r#"<img src="a.png" alt="A">"#), "![A](a.png)");
    }

    #[test]
    fn image_without_alt_uses_empty_text() {
        assert_eq!(transduce(r#"<img src="a.png">"#), "![](a.png)");
    }

    #[test]
    fn image_without_src_renders_nothing() {
        assert_eq!(transduce(r#"<p>x<img alt="A">y</p>"#), "xy");
    }
}
