//! Built-in transduction rules
//!
//! One file per concern, mirroring how the rule set groups in practice:
//! block structure, inline spans, lists, tables, code, and media. Generic
//! containers (`div`, `span`, `thead`, `tbody`, …) deliberately have no
//! rule and fall through to the engine's pass-through default.

mod block;
mod code;
mod inline;
mod list;
mod media;
mod table;

pub use block::{BlockquoteRule, HeadingRule, ParagraphRule, ThematicBreakRule};
pub use code::FencedCodeRule;
pub use inline::{
    EmphasisRule, InlineCodeRule, LineBreakRule, LinkRule, StrikethroughRule, StrongRule,
};
pub use list::{ListItemRule, ListRule};
pub use media::ImageRule;
pub use table::{TableCellRule, TableRowRule, TableRule};

use crate::rule::{RenderRule, RuleTable};

/// Build the default rule table.
///
/// Registration order is the tie-break order for equal priorities, so the
/// structurally specific rules come first.
pub fn default_table() -> RuleTable {
    let mut table = RuleTable::new();
    let rules: Vec<Box<dyn RenderRule>> = vec![
        Box::new(FencedCodeRule),
        Box::new(ImageRule),
        Box::new(TableRule),
        Box::new(TableRowRule),
        Box::new(TableCellRule),
        Box::new(ListRule),
        Box::new(ListItemRule),
        Box::new(HeadingRule),
        Box::new(ParagraphRule),
        Box::new(BlockquoteRule),
        Box::new(ThematicBreakRule),
        Box::new(StrongRule),
        Box::new(EmphasisRule),
        Box::new(StrikethroughRule),
        Box::new(LinkRule),
        Box::new(LineBreakRule),
        Box::new(InlineCodeRule),
    ];
    for rule in rules {
        table.register(rule);
    }
    table
}
