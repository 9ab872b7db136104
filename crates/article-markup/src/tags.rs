//! Tag normalization
//!
//! Content sources represent categories inconsistently: bare strings,
//! objects with a `name`, objects with a `title`, or a mix. This module
//! folds them, together with a comma-delimited free-form tag string, into
//! the deduplicated, bounded tag list the publisher accepts.

use serde::{Deserialize, Serialize};

/// Tag substituted when normalization yields nothing
pub const FALLBACK_TAG: &str = "blog";

/// A publish-ready tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A category as delivered by the content source.
///
/// Deserializes from a bare string or from an object exposing a
/// name-like field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Plain(String),
    Named { name: String },
    Titled { title: String },
}

impl CategoryRef {
    /// The human-readable label, whatever shape the source used
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(label) => label,
            Self::Named { name } => name,
            Self::Titled { title } => title,
        }
    }
}

/// Fold categories and a comma-delimited tag string into a bounded,
/// deduplicated tag list.
///
/// Candidates keep first-seen order; duplicates (exact string equality),
/// empties, and over-long names are discarded; the list is cut to
/// `max_tags`; an empty result substitutes the single fixed fallback tag.
/// Pure apart from `tracing` diagnostics for dropped candidates.
pub fn normalize_tags(
    categories: &[CategoryRef],
    raw_tags: &str,
    max_tags: usize,
    max_tag_length: usize,
) -> Vec<Tag> {
    let candidates = categories
        .iter()
        .map(|c| c.label().trim())
        .chain(raw_tags.split(',').map(str::trim));

    let mut seen: Vec<&str> = Vec::new();
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        if candidate.chars().count() > max_tag_length {
            tracing::debug!(tag = candidate, max_tag_length, "dropping over-long tag");
            continue;
        }
        if seen.contains(&candidate) {
            continue;
        }
        seen.push(candidate);
    }

    if seen.len() > max_tags {
        tracing::debug!(
            dropped = seen.len() - max_tags,
            max_tags,
            "truncating tag list"
        );
        seen.truncate(max_tags);
    }

    if seen.is_empty() {
        return vec![Tag::new(FALLBACK_TAG)];
    }

    seen.into_iter().map(Tag::new).collect()
}
