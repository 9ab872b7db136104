//! Markdown transduction engine
//!
//! Walks a markup tree bottom-up, applies the selected rule per node,
//! and normalizes whitespace once over the assembled document. One engine
//! instance is immutable after construction and safe to reuse across
//! documents.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::node::{Element, Node};
use crate::parser::parse_markup;
use crate::rule::{RenderContext, RenderRule, RuleTable};
use crate::rules;

/// Pattern to match runs of three or more line breaks
static MULTIPLE_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Characters escaped in plain text so they survive as literals in the
/// target markup
const ESCAPE_CHARS: &[char] = &['\\', '`', '*', '_', '[', ']'];

/// Engine options consumed by the built-in rules.
#[derive(Debug, Clone)]
pub struct TransduceOptions {
    /// Marker for unordered list items
    pub bullet: String,
    /// Indent unit for content nested under a list marker
    pub indent: String,
    /// Closing section appended to every assembled document; empty
    /// disables the append
    pub footer: String,
}

impl Default for TransduceOptions {
    fn default() -> Self {
        Self {
            bullet: "-".to_string(),
            indent: "  ".to_string(),
            footer: String::new(),
        }
    }
}

/// Tree-to-Markdown transducer with an ordered, extensible rule table.
pub struct Transducer {
    table: RuleTable,
    options: TransduceOptions,
}

impl Default for Transducer {
    fn default() -> Self {
        Self::new(TransduceOptions::default())
    }
}

impl Transducer {
    /// Create an engine with the built-in rule set
    pub fn new(options: TransduceOptions) -> Self {
        Self {
            table: rules::default_table(),
            options,
        }
    }

    /// Append a custom rule after the built-ins.
    ///
    /// Registration order is the tie-break order, so a custom rule that
    /// should displace a built-in needs a higher priority, not just a
    /// matching predicate.
    pub fn with_rule(mut self, rule: Box<dyn RenderRule>) -> Self {
        self.table.register(rule);
        self
    }

    pub fn options(&self) -> &TransduceOptions {
        &self.options
    }

    /// Transduce a markup tree into normalized Markdown.
    ///
    /// Nodes with no matching rule fall through to the defaults: elements
    /// pass their rendered children straight through, text renders as
    /// escaped content with whitespace runs collapsed.
    pub fn transduce(&self, root: &Node) -> String {
        let mut ancestors: Vec<&Element> = Vec::new();
        let rendered = self.render_node(root, &mut ancestors, 0, false);
        normalize_whitespace(&rendered)
    }

    /// Parse an HTML fragment and transduce it.
    ///
    /// # Errors
    ///
    /// Returns an error only for structurally unacceptable input (nesting
    /// beyond the depth guard); malformed markup is recovered by the
    /// parser and degrades to empty substitutions in the rules.
    pub fn transduce_str(&self, markup: &str) -> Result<String> {
        let root = parse_markup(markup)?;
        Ok(self.transduce(&root))
    }

    /// Assemble a full article document.
    ///
    /// After each part is transduced and normalized, two deterministic
    /// appends happen in order: a non-blank excerpt is prepended followed
    /// by a blank line, then the configured footer is appended after a
    /// blank line.
    pub fn transduce_document(&self, body: &str, excerpt: Option<&str>) -> Result<String> {
        let mut document = self.transduce_str(body)?;

        if let Some(excerpt) = excerpt
            && !excerpt.trim().is_empty()
        {
            let lead = self.transduce_str(excerpt)?;
            if !lead.is_empty() {
                document = format!("{lead}\n\n{document}");
            }
        }

        if !self.options.footer.trim().is_empty() {
            document = format!("{document}\n\n{}", self.options.footer.trim());
        }

        Ok(document)
    }

    fn render_node<'a>(
        &self,
        node: &'a Node,
        ancestors: &mut Vec<&'a Element>,
        index: usize,
        has_next_sibling: bool,
    ) -> String {
        // Children first: rules receive their content already rendered
        let children_rendered = match node {
            Node::Element(el) => {
                let total_elements = el.element_child_count();
                ancestors.push(el);
                let mut out = String::new();
                let mut elements_seen = 0;
                for child in &el.children {
                    let (child_index, child_has_next) = if child.is_element() {
                        let pair = (elements_seen, elements_seen + 1 < total_elements);
                        elements_seen += 1;
                        pair
                    } else {
                        (elements_seen, elements_seen < total_elements)
                    };
                    out.push_str(&self.render_node(child, ancestors, child_index, child_has_next));
                }
                ancestors.pop();
                out
            }
            Node::Text(_) => String::new(),
        };

        let cx = RenderContext::new(ancestors.as_slice(), index, has_next_sibling, &self.options);
        match self.table.select(node) {
            Some(rule) => rule.render(node, &children_rendered, &cx),
            None => match node {
                Node::Element(_) => children_rendered,
                Node::Text(text) => escape_text(text),
            },
        }
    }
}

/// Collapse runs of three or more line breaks to exactly two
pub(crate) fn collapse_blank_lines(rendered: &str) -> String {
    MULTIPLE_BLANK_LINES.replace_all(rendered, "\n\n").into_owned()
}

/// Whitespace post-processing applied once to a fully rendered document:
/// trailing whitespace trimmed per line, blank-line runs collapsed,
/// leading and trailing blank lines stripped.
///
/// Idempotent: re-applying to already-normalized output is a no-op.
pub fn normalize_whitespace(rendered: &str) -> String {
    let trimmed_lines: String = rendered
        .lines()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    collapse_blank_lines(&trimmed_lines).trim().to_string()
}

/// Default rendering for text nodes: markdown specials escaped,
/// whitespace runs collapsed to single spaces.
///
/// Inter-element formatting whitespace (whitespace-only text containing a
/// line break) renders as nothing so it cannot smear spaces between
/// blocks; whitespace-only text on a single line keeps one space for
/// inline separation.
fn escape_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if raw.chars().all(char::is_whitespace) {
        return if raw.contains('\n') {
            String::new()
        } else {
            " ".to_string()
        };
    }

    let mut out = String::with_capacity(raw.len());
    let mut previous_was_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !previous_was_space {
                out.push(' ');
            }
            previous_was_space = true;
        } else {
            previous_was_space = false;
            if ESCAPE_CHARS.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out
}
