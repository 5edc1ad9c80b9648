//! HTTP adapter for the remote collection API.

mod client;

pub use client::ResourceClient;
