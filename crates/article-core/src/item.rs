//! Content item model
//!
//! The shape one article takes as it arrives from the content source.
//! The `id` is the stable join key against the state store and never
//! changes across revisions of the same article.

use article_markup::CategoryRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One article from the content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Stable external identity
    pub id: String,
    pub title: String,
    /// Rich-text body as raw HTML
    #[serde(default)]
    pub content: String,
    /// Optional lead paragraph, also raw HTML
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Categories in whatever shape the source uses
    #[serde(default)]
    pub categories: Categories,
    /// Free-form comma-delimited tag string
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub revised_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// The timestamp that drives the sync decision: the first present
    /// value among update, revision, and publish time, in that order.
    pub fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.revised_at).or(self.published_at)
    }
}

/// Category field as delivered by the source: a single value or a
/// sequence, flattened to a slice for normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Categories {
    Many(Vec<CategoryRef>),
    One(CategoryRef),
}

impl Default for Categories {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Categories {
    pub fn as_slice(&self) -> &[CategoryRef] {
        match self {
            Self::Many(refs) => refs,
            Self::One(one) => std::slice::from_ref(one),
        }
    }
}
