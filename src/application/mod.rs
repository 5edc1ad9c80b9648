//! Application layer: list caches, filtering, and the per-view mutation rules.

pub mod cache;
pub mod dialogs;
pub mod error;
pub mod filter;
pub mod page;
pub mod posts;
pub mod repos;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;
