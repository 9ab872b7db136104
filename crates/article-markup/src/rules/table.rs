//! Table rules
//!
//! Header detection follows a single deterministic precedence: a row is a
//! header row iff its parent is `thead`, or the table has no `thead` and
//! the row is the very first row of the table in document order. Any
//! further header-like rows are data rows; the engine does not guess.

use crate::node::{Element, Node};
use crate::rule::{RenderContext, RenderRule};

/// `table` renders as rows wrapped in blank lines to separate from prose
pub struct TableRule;

impl RenderRule for TableRule {
    fn id(&self) -> &'static str {
        "table"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("table")
    }

    fn render(&self, _node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        format!("\n\n{}\n\n", children.trim_matches('\n'))
    }
}

/// `tr` renders as a pipe-delimited row, with a separator line after the header row
pub struct TableRowRule;

impl TableRowRule {
    fn is_header_row(row: &Element, cx: &RenderContext<'_>) -> bool {
        if cx.parent().is_some_and(|p| p.tag == "thead") {
            return true;
        }
        let Some(table) = cx.nearest("table") else {
            return false;
        };
        if table_has_thead(table) {
            return false;
        }
        first_row(table).is_some_and(|first| std::ptr::eq(first, row))
    }
}

impl RenderRule for TableRowRule {
    fn id(&self) -> &'static str {
        "table-row"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("tr")
    }

    fn render(&self, node: &Node, children: &str, cx: &RenderContext<'_>) -> String {
        let Some(row) = node.as_element() else {
            return children.to_string();
        };

        let mut out = format!("|{children}\n");
        if Self::is_header_row(row, cx) {
            let cells = row.element_child_count();
            out.push('|');
            for _ in 0..cells {
                out.push_str("---|");
            }
            out.push('\n');
        }
        out
    }
}

/// `td` / `th` render as trimmed, pipe-escaped cell content
pub struct TableCellRule;

impl RenderRule for TableCellRule {
    fn id(&self) -> &'static str {
        "table-cell"
    }

    fn matches(&self, node: &Node) -> bool {
        node.is_tag("td") || node.is_tag("th")
    }

    fn render(&self, _node: &Node, children: &str, _cx: &RenderContext<'_>) -> String {
        let content = children.replace('\n', " ").replace('|', "\\|");
        format!(" {} |", content.trim())
    }
}

fn table_has_thead(table: &Element) -> bool {
    table.children.iter().any(|c| c.is_tag("thead"))
}

/// First `tr` of the table in document order, descending through header
/// and body groups
fn first_row(table: &Element) -> Option<&Element> {
    for child in &table.children {
        if let Some(el) = child.as_element() {
            if el.tag == "tr" {
                return Some(el);
            }
            if let Some(row) = first_row(el) {
                return Some(row);
            }
        }
    }
    None
}
