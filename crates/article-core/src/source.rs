//! Content source collaborator seam

use async_trait::async_trait;

use crate::Result;
use crate::item::ContentItem;

/// Supplies the finite ordered sequence of items for one run.
///
/// The core neither paginates nor retries this call; a failure here is
/// batch-fatal and aborts the run before any publish is attempted.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch up to `limit` items, newest first
    async fn fetch_items(&self, limit: usize) -> Result<Vec<ContentItem>>;
}
