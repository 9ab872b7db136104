//! Rule trait and the ordered rule table
//!
//! Rules are registered once at engine construction and the table is
//! immutable afterwards, so a single engine instance can transduce many
//! documents. Selection is deterministic: the highest-priority matching
//! rule wins, and ties go to the earliest-registered rule.

use crate::engine::TransduceOptions;
use crate::node::{Element, Node};

/// A transduction rule: a match predicate plus a render function.
///
/// `render` receives the node and its children already rendered and
/// concatenated in document order (the walk is post-order). Rules that
/// need the literal source text instead, like fenced code blocks, read
/// it from the node directly.
pub trait RenderRule: Send + Sync {
    /// Stable identifier, for diagnostics
    fn id(&self) -> &'static str;

    /// Higher priority wins; ties break toward earliest registration
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this rule applies to the node
    fn matches(&self, node: &Node) -> bool;

    /// Produce output for the node given its rendered children
    fn render(&self, node: &Node, children: &str, cx: &RenderContext<'_>) -> String;
}

/// Structural facts about the node being rendered, computed by the engine
/// during the walk.
///
/// `index` and `has_next_sibling` count element siblings only; formatting
/// whitespace between elements does not affect list numbering or row
/// positions.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    ancestors: &'a [&'a Element],
    index: usize,
    has_next_sibling: bool,
    options: &'a TransduceOptions,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        ancestors: &'a [&'a Element],
        index: usize,
        has_next_sibling: bool,
        options: &'a TransduceOptions,
    ) -> Self {
        Self {
            ancestors,
            index,
            has_next_sibling,
            options,
        }
    }

    /// The node's parent element, if any
    pub fn parent(&self) -> Option<&'a Element> {
        self.ancestors.last().copied()
    }

    /// Innermost ancestor with the given tag name
    pub fn nearest(&self, tag: &str) -> Option<&'a Element> {
        self.ancestors.iter().rev().find(|el| el.tag == tag).copied()
    }

    /// Zero-based position among the parent's element children
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether another element sibling follows this node
    pub fn has_next_sibling(&self) -> bool {
        self.has_next_sibling
    }

    /// Engine options (bullet marker, indent unit)
    pub fn options(&self) -> &'a TransduceOptions {
        self.options
    }
}

/// Ordered set of rules with deterministic selection.
#[derive(Default)]
pub struct RuleTable {
    rules: Vec<Box<dyn RenderRule>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Registration order is the tie-break order.
    pub fn register(&mut self, rule: Box<dyn RenderRule>) {
        self.rules.push(rule);
    }

    /// Select the rule for a node: highest priority among matches,
    /// first-registered on equal priority.
    ///
    /// The strictly-greater comparison is what keeps the tie-break
    /// deterministic; a later rule never displaces an earlier one of the
    /// same priority.
    pub fn select(&self, node: &Node) -> Option<&dyn RenderRule> {
        let mut selected: Option<&dyn RenderRule> = None;
        let mut best = i32::MIN;
        for rule in &self.rules {
            if rule.matches(node) && (selected.is_none() || rule.priority() > best) {
                best = rule.priority();
                selected = Some(rule.as_ref());
            }
        }
        selected
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
