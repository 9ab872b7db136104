//! In-memory collaborator fakes

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use article_core::{ContentItem, ContentSource, Error, PublishRequest, Publisher, Result};

/// A content source serving a fixed in-memory list.
pub struct FakeSource {
    items: Vec<ContentItem>,
}

impl FakeSource {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl ContentSource for FakeSource {
    async fn fetch_items(&self, limit: usize) -> Result<Vec<ContentItem>> {
        Ok(self.items.iter().take(limit).cloned().collect())
    }
}

/// A content source that always fails, for batch-fatal scenarios.
pub struct FailingSource;

#[async_trait]
impl ContentSource for FailingSource {
    async fn fetch_items(&self, _limit: usize) -> Result<Vec<ContentItem>> {
        Err(Error::source_error("fake source failure"))
    }
}

/// A publisher that records every request and can be scripted to fail
/// for specific item titles.
///
/// Remote identifiers are assigned as `q-1`, `q-2`, … in creation order;
/// updates echo the target id back.
#[derive(Default)]
pub struct RecordingPublisher {
    created: Mutex<Vec<PublishRequest>>,
    updated: Mutex<Vec<(String, PublishRequest)>>,
    fail_titles: HashSet<String>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any create/update whose request title is in `titles`
    pub fn failing_for(titles: &[&str]) -> Self {
        Self {
            fail_titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Requests passed to `create`, in order
    pub fn created(&self) -> Vec<PublishRequest> {
        self.created.lock().unwrap().clone()
    }

    /// `(target_id, request)` pairs passed to `update`, in order
    pub fn updated(&self) -> Vec<(String, PublishRequest)> {
        self.updated.lock().unwrap().clone()
    }

    /// Total publish calls that succeeded
    pub fn publish_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.updated.lock().unwrap().len()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn create(&self, request: &PublishRequest) -> Result<String> {
        if self.fail_titles.contains(&request.title) {
            return Err(Error::publish(&request.title, "scripted failure"));
        }
        let mut created = self.created.lock().unwrap();
        created.push(request.clone());
        Ok(format!("q-{}", created.len()))
    }

    async fn update(&self, target_id: &str, request: &PublishRequest) -> Result<String> {
        if self.fail_titles.contains(&request.title) {
            return Err(Error::publish(&request.title, "scripted failure"));
        }
        self.updated
            .lock()
            .unwrap()
            .push((target_id.to_string(), request.clone()));
        Ok(target_id.to_string())
    }
}
