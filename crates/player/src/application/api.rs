//! Typed API wrapper for application services.
//!
//! `Api` wraps an `Arc<dyn RawApiPort>` and converts between JSON values and
//! typed request/response bodies with serde_json.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::ports::outbound::{ApiError, RawApiPort};

#[derive(Clone)]
pub struct Api {
    raw: Arc<dyn RawApiPort>,
}

impl Api {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { raw }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.raw.get_json(path).await?;
        decode(value)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body_value = encode(body)?;
        let value = self.raw.post_json(path, &body_value).await?;
        decode(value)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body_value = encode(body)?;
        let value = self.raw.put_json(path, &body_value).await?;
        decode(value)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.raw.delete(path).await
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Serialize(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}
