//! Error types for the enhancement runtime.
//!
//! Runtime enhancement failures (missing capability, malformed style, failed
//! preload fetch) are deliberately not represented here: they degrade the
//! affected task silently and are only logged. These types cover the places
//! where a caller must be told something went wrong.

use thiserror::Error;

/// Errors surfaced to embedders of the enhancement runtime.
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was not valid JSON for [`EnhancerConfig`].
    ///
    /// [`EnhancerConfig`]: crate::config::EnhancerConfig
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP fetcher could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Errors from a single resource fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The underlying HTTP request failed (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// A `data:` URL payload could not be decoded.
    #[error("invalid data url: {0}")]
    DataUrl(String),

    /// The URL scheme is not fetchable (neither http(s) nor data).
    #[error("unsupported url scheme in {0}")]
    UnsupportedScheme(String),
}
