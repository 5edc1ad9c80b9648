//! Lifecycle shared by the list views.

use crate::application::error::{LoadError, WriteError};
use crate::domain::error::ValidationError;

/// Load state of a view. Caches only exist in `Ready`.
#[derive(Debug)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    Failed(LoadError),
}

impl<T> PageState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome of a create, edit or delete intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// The change is in the cache.
    Applied,
    /// A required field was empty; nothing was sent.
    Invalid(ValidationError),
    /// The operator declined a confirmation or cancelled a prompt.
    Cancelled,
    /// No cached record carries this id.
    NotFound(i64),
    /// The view has no cache yet (still loading, or the load failed).
    NotLoaded,
    /// The write call failed. `applied` tells whether the cache was changed
    /// anyway.
    Failed { error: WriteError, applied: bool },
}

impl Mutation {
    /// Whether the cache now reflects the intent.
    pub fn changed_cache(&self) -> bool {
        matches!(self, Self::Applied | Self::Failed { applied: true, .. })
    }
}
