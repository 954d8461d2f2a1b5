//! Resource fetching capability.
//!
//! Background preloads go through a [`ResourceFetcher`] so the runtime never
//! hardwires a transport: production embedders hand it an [`HttpFetcher`],
//! tests hand it a stub. Fetched bodies are not retained; a preload exists
//! to warm caches, so only the metadata survives.

mod data_url;
mod http;

pub use http::HttpFetcher;

use crate::error::FetchError;
use async_trait::async_trait;

/// Metadata of a successfully fetched resource.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// The URL that was fetched.
    pub url: String,
    /// Content type reported by the origin, when available.
    pub content_type: Option<String>,
    /// Decoded body size in bytes.
    pub bytes: usize,
}

/// Capability to fetch a resource by URL.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError>;
}
