//! Raw API Port - Object-safe HTTP boundary
//!
//! `RawApiPort` moves JSON values only, so adapters can be stored behind
//! `Arc<dyn RawApiPort>`. The application layer provides the typed wrapper
//! (`application::api::Api`) on top.

use async_trait::async_trait;
use serde_json::Value;

use super::ApiError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    /// Any 2xx counts as success; the acknowledgement body is discarded.
    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
