//! microCMS content source client

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use article_core::{ContentItem, ContentSource, Error, Result};

const USER_AGENT: &str = concat!("article-sync/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// microCMS list API client.
///
/// Fetches one page of articles, newest first. The core neither
/// paginates nor retries, so neither does this client.
pub struct MicroCmsClient {
    http: reqwest::Client,
    service: String,
    endpoint: String,
    api_key: String,
}

impl MicroCmsClient {
    /// Create a client for `https://{service}.microcms.io/api/v1/{endpoint}`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        service: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::source_error(e.to_string()))?;

        Ok(Self {
            http,
            service: service.into(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    fn list_url(&self) -> String {
        format!(
            "https://{}.microcms.io/api/v1/{}",
            self.service, self.endpoint
        )
    }
}

/// microCMS list responses wrap the items in a `contents` envelope
#[derive(Debug, Deserialize)]
struct ListResponse {
    contents: Vec<ContentItem>,
}

#[async_trait]
impl ContentSource for MicroCmsClient {
    async fn fetch_items(&self, limit: usize) -> Result<Vec<ContentItem>> {
        let response = self
            .http
            .get(self.list_url())
            .header("X-MICROCMS-API-KEY", &self.api_key)
            .query(&[
                ("limit", limit.to_string()),
                ("orders", "-publishedAt".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::source_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::source_error(format!(
                "API error {}: {body}",
                status.as_u16()
            )));
        }

        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| Error::source_error(format!("invalid list response: {e}")))?;

        tracing::debug!(count = list.contents.len(), "fetched content list");
        Ok(list.contents)
    }
}
