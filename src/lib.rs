//! placeholder-admin: a terminal admin console for the users and posts of the
//! JSONPlaceholder demo API.
//!
//! Each view owns an in-memory copy of its collection, fetched once when the
//! view is opened. Searches filter that copy locally; writes are dispatched to
//! the API and applied optimistically because the demo service never persists
//! them.

pub mod application;
pub mod config;
pub mod console;
pub mod domain;
pub mod infra;
pub mod presentation;
