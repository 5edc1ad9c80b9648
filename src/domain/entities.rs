//! Records held in the per-view list caches.

pub use placeholder_admin_types::{Post, User};

/// A record addressable by its integer id.
pub trait Record {
    fn id(&self) -> i64;
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Post {
    fn id(&self) -> i64 {
        self.id
    }
}
