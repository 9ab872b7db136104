//! Qiita publisher client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use article_core::{Error, PublishRequest, Publisher, Result, Visibility};
use article_markup::Tag;

const QIITA_BASE_URL: &str = "https://qiita.com/api/v2";
const USER_AGENT: &str = concat!("article-sync/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Qiita items API client.
pub struct QiitaClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl QiitaClient {
    /// Create a client authenticated with a personal access token
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::publish("qiita client", e.to_string()))?;

        Ok(Self {
            http,
            base_url: QIITA_BASE_URL.to_string(),
            token: token.into(),
        })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        title: &str,
    ) -> Result<String> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::publish(title, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::publish(
                title,
                format!("API error {}: {body}", status.as_u16()),
            ));
        }

        let item: ItemResponse = response
            .json()
            .await
            .map_err(|e| Error::publish(title, format!("invalid item response: {e}")))?;
        Ok(item.id)
    }
}

/// Outgoing item payload in the shape the items API accepts
#[derive(Debug, Serialize)]
struct ItemPayload<'a> {
    title: &'a str,
    body: &'a str,
    private: bool,
    tags: &'a [Tag],
}

impl<'a> ItemPayload<'a> {
    fn from_request(request: &'a PublishRequest) -> Self {
        Self {
            title: &request.title,
            body: &request.body,
            private: request.visibility == Visibility::Private,
            tags: &request.tags,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ItemResponse {
    id: String,
}

#[async_trait]
impl Publisher for QiitaClient {
    async fn create(&self, request: &PublishRequest) -> Result<String> {
        tracing::debug!(title = %request.title, "creating article");
        let builder = self
            .http
            .post(format!("{}/items", self.base_url))
            .json(&ItemPayload::from_request(request));
        self.send(builder, &request.title).await
    }

    async fn update(&self, target_id: &str, request: &PublishRequest) -> Result<String> {
        tracing::debug!(title = %request.title, target_id, "updating article");
        let builder = self
            .http
            .patch(format!("{}/items/{target_id}", self.base_url))
            .json(&ItemPayload::from_request(request));
        self.send(builder, &request.title).await
    }
}
