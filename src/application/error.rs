use thiserror::Error;

use crate::{
    application::repos::{ApiError, ResourceKind},
    config,
    infra::error::InfraError,
};

/// The initial fetch of a view failed; the view shows this message and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    message: String,
    #[source]
    source: ApiError,
}

impl LoadError {
    pub fn new(source: ApiError) -> Self {
        Self {
            message: source.to_string(),
            source,
        }
    }

    /// Status failures are prefixed with the collection label (`Posts: 500
    /// Internal Server Error`) on views that load more than one collection.
    pub fn for_resource(resource: ResourceKind, source: ApiError) -> Self {
        let message = match &source {
            ApiError::Status { .. } => format!("{}: {source}", resource.label()),
            _ => source.to_string(),
        };
        Self { message, source }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A create, update or delete call was rejected. Surfaced to the operator as
/// an alert; whether the cache change stuck depends on the view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{alert}")]
pub struct WriteError {
    alert: &'static str,
    #[source]
    source: ApiError,
}

impl WriteError {
    pub fn new(alert: &'static str, source: ApiError) -> Self {
        Self { alert, source }
    }

    pub fn alert(&self) -> &'static str {
        self.alert
    }
}

/// Top-level failure of the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to load view: {0}")]
    Load(#[from] LoadError),
    #[error("console io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render output: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failures_carry_resource_prefix() {
        let err = LoadError::for_resource(
            ResourceKind::Posts,
            ApiError::status(500, "Internal Server Error"),
        );
        assert_eq!(err.message(), "Posts: 500 Internal Server Error");

        let plain = LoadError::new(ApiError::status(404, "Not Found"));
        assert_eq!(plain.to_string(), "404 Not Found");
    }

    #[test]
    fn transport_failures_are_not_prefixed() {
        let err = LoadError::for_resource(
            ResourceKind::Users,
            ApiError::Transport("connection refused".into()),
        );
        assert_eq!(err.message(), "network error: connection refused");
    }
}
