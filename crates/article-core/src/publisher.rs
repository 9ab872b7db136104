//! Publisher collaborator seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use article_markup::Tag;

/// Visibility of a published article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// One outgoing publish payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishRequest {
    pub title: String,
    /// Fully assembled Markdown body
    pub body: String,
    pub tags: Vec<Tag>,
    pub visibility: Visibility,
}

/// Accepts publish requests and returns the opaque remote identifier.
///
/// Any non-success is surfaced as an error and counted as a per-item
/// failure by the runner; the collaborator is not expected to retry.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish a new article; returns its remote identifier
    async fn create(&self, request: &PublishRequest) -> Result<String>;

    /// Update an existing article by remote identifier
    async fn update(&self, target_id: &str, request: &PublishRequest) -> Result<String>;
}
