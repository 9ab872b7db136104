//! [`ItemBuilder`] for content-item test scenarios.

use article_core::{Categories, ContentItem};
use article_markup::CategoryRef;
use chrono::{DateTime, TimeZone, Utc};

/// Builder for [`ContentItem`] fixtures with sensible defaults.
///
/// # Example
///
/// ```rust
/// use article_test_utils::ItemBuilder;
///
/// let item = ItemBuilder::new("art-1")
///     .title("Hello")
///     .content("<p>hi</p>")
///     .updated_at_s(5)
///     .build();
/// assert!(item.effective_timestamp().is_some());
/// ```
pub struct ItemBuilder {
    item: ContentItem,
}

impl ItemBuilder {
    /// Start a builder for the given item id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            item: ContentItem {
                title: format!("Title {id}"),
                id,
                content: "<p>body</p>".to_string(),
                excerpt: None,
                categories: Categories::default(),
                tags: String::new(),
                published_at: None,
                updated_at: None,
                revised_at: None,
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.item.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.item.content = content.into();
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.item.excerpt = Some(excerpt.into());
        self
    }

    pub fn categories(mut self, labels: &[&str]) -> Self {
        self.item.categories = Categories::Many(
            labels
                .iter()
                .map(|l| CategoryRef::Plain(l.to_string()))
                .collect(),
        );
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.item.tags = tags.into();
        self
    }

    pub fn published_at(mut self, at: DateTime<Utc>) -> Self {
        self.item.published_at = Some(at);
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.item.updated_at = Some(at);
        self
    }

    pub fn revised_at(mut self, at: DateTime<Utc>) -> Self {
        self.item.revised_at = Some(at);
        self
    }

    /// Set `updatedAt` to a fixed date offset by `seconds`, for terse
    /// ordering in tests
    pub fn updated_at_s(self, seconds: u32) -> Self {
        self.updated_at(fixed_time(seconds))
    }

    pub fn build(self) -> ContentItem {
        self.item
    }
}

/// A fixed, documented test epoch offset by `seconds`
pub fn fixed_time(seconds: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(seconds.into())
}
