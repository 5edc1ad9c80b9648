use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::application::repos::{ApiError, ResourceApi, ResourceKind};
use crate::config::ApiSettings;
use crate::infra::error::InfraError;

/// reqwest-backed client for `{base}/{resource}` and `{base}/{resource}/{id}`.
#[derive(Clone, Debug)]
pub struct ResourceClient {
    client: Client,
    base: Url,
}

impl ResourceClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, InfraError> {
        let mut builder = Client::builder().user_agent(Self::user_agent());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| InfraError::http_client(e.to_string()))?;
        Ok(Self {
            client,
            base: settings.base_url.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("placeholder-admin/", env!("CARGO_PKG_VERSION"))
    }

    pub fn url(&self, resource: ResourceKind, id: Option<i64>) -> Result<Url, ApiError> {
        let path = match id {
            Some(id) => format!("{}/{id}", resource.path()),
            None => resource.path().to_string(),
        };
        self.base
            .join(&path)
            .map_err(|e| ApiError::Url(e.to_string()))
    }

    async fn send(
        &self,
        method: Method,
        resource: ResourceKind,
        id: Option<i64>,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let url = self.url(resource, id)?;
        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(&b);
        }
        req.send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// Reads fail on any non-2xx status and on a body that is not JSON.
    async fn read(resp: Response) -> Result<Value, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        let bytes = body_bytes(resp).await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Writes succeed once the server answers, whatever the status. The body
    /// comes back as JSON when it parses, as a string otherwise.
    async fn settle(resp: Response) -> Result<Value, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "write answered with non-success status");
        }
        let bytes = body_bytes(resp).await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
    }
}

async fn body_bytes(resp: Response) -> Result<Vec<u8>, ApiError> {
    resp.bytes()
        .await
        .map(|body| body.to_vec())
        .map_err(|e| ApiError::Transport(e.to_string()))
}

#[async_trait]
impl ResourceApi for ResourceClient {
    #[instrument(skip(self), fields(method = "GET"))]
    async fn list(&self, resource: ResourceKind) -> Result<Value, ApiError> {
        let resp = self.send(Method::GET, resource, None, None).await?;
        debug!(status = resp.status().as_u16(), "list response");
        Self::read(resp).await
    }

    #[instrument(skip(self, payload), fields(method = "POST"))]
    async fn create(&self, resource: ResourceKind, payload: Value) -> Result<Value, ApiError> {
        let resp = self
            .send(Method::POST, resource, None, Some(payload))
            .await?;
        debug!(status = resp.status().as_u16(), "create response");
        Self::settle(resp).await
    }

    #[instrument(skip(self, payload), fields(method = "PUT"))]
    async fn update(
        &self,
        resource: ResourceKind,
        id: i64,
        payload: Value,
    ) -> Result<Value, ApiError> {
        let resp = self
            .send(Method::PUT, resource, Some(id), Some(payload))
            .await?;
        debug!(status = resp.status().as_u16(), "update response");
        Self::settle(resp).await
    }

    #[instrument(skip(self), fields(method = "DELETE"))]
    async fn delete(&self, resource: ResourceKind, id: i64) -> Result<(), ApiError> {
        let resp = self.send(Method::DELETE, resource, Some(id), None).await?;
        debug!(status = resp.status().as_u16(), "delete response");
        Self::settle(resp).await.map(|_| ())
    }
}
