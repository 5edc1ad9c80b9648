//! The remote collection API as seen by the views.

use std::fmt;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

/// Collections exposed by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Users,
    Posts,
}

impl ResourceKind {
    /// Path segment of the collection endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Posts => "Posts",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("failed to parse body: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("invalid URL: {0}")]
    Url(String),
}

impl ApiError {
    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            status,
            reason: reason.into(),
        }
    }
}

/// One request per call, no retries. Write responses are echoed back as raw
/// JSON; callers must not treat them as the source of truth for ids.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list(&self, resource: ResourceKind) -> Result<Value, ApiError>;

    async fn create(&self, resource: ResourceKind, payload: Value) -> Result<Value, ApiError>;

    async fn update(
        &self,
        resource: ResourceKind,
        id: i64,
        payload: Value,
    ) -> Result<Value, ApiError>;

    async fn delete(&self, resource: ResourceKind, id: i64) -> Result<(), ApiError>;
}

/// Fetch a whole collection and decode it into typed records.
pub async fn fetch_all<T: DeserializeOwned>(
    api: &dyn ResourceApi,
    resource: ResourceKind,
) -> Result<Vec<T>, ApiError> {
    let value = api.list(resource).await?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn to_payload<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))
}
