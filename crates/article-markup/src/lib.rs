//! Markup transduction and tag normalization for article-sync
//!
//! Converts rich-text HTML bodies into Markdown through an ordered,
//! extensible rule table, and folds heterogeneous category and tag
//! inputs into a bounded publish-ready tag list.

pub mod engine;
pub mod error;
pub mod node;
pub mod parser;
pub mod rule;
pub mod rules;
pub mod tags;

pub use engine::{TransduceOptions, Transducer, normalize_whitespace};
pub use error::{Error, Result};
pub use node::{Element, Node};
pub use parser::parse_markup;
pub use rule::{RenderContext, RenderRule, RuleTable};
pub use tags::{CategoryRef, FALLBACK_TAG, Tag, normalize_tags};
