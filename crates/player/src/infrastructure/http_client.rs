//! HTTP adapter for the story API (reqwest)

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::ports::outbound::{ApiError, RawApiPort};

/// `RawApiPort` implementation over a shared `reqwest::Client`
#[derive(Clone)]
pub struct ApiAdapter {
    client: Client,
    base_url: String,
}

impl ApiAdapter {
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn send(&self, method: &'static str, path: &str, request: RequestBuilder) -> Result<Value, ApiError> {
        tracing::debug!(method, path, "Story API request");

        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(method, path, error = %e, "Story API request failed");
                ApiError::Network(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(method, path, status = status.as_u16(), "Story API returned an error");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_body(&text)
    }
}

#[async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let request = self
            .client
            .get(self.url(path))
            .header(CONTENT_TYPE, "application/json");
        self.send("GET", path, request).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let request = self.client.post(self.url(path)).json(body);
        self.send("POST", path, request).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let request = self.client.put(self.url(path)).json(body);
        self.send("PUT", path, request).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(path))
            .header(CONTENT_TYPE, "application/json");
        self.send("DELETE", path, request).await.map(|_| ())
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Empty bodies (plain acknowledgements) become `Value::Null`.
fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}
