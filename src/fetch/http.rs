//! HTTP-backed resource fetcher.

use super::{data_url, FetchedResource, ResourceFetcher};
use crate::error::{EnhanceError, FetchError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("pagelift/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `http(s)` resources with a shared [`reqwest::Client`]; `data:`
/// URLs are decoded locally without a request.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, EnhanceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(EnhanceError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Wrap an existing client, keeping the embedder's connection pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        if url.starts_with("data:") {
            return data_url::decode(url);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FetchError::UnsupportedScheme(url.to_string()));
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?;
        debug!(url, bytes = body.len(), "fetched resource");

        Ok(FetchedResource {
            url: url.to_string(),
            content_type,
            bytes: body.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bg.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![0u8; 128])
                    .insert_header("content-type", "image/png"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let resource = fetcher
            .fetch(&format!("{}/bg.png", server.uri()))
            .await
            .unwrap();

        assert_eq!(resource.bytes, 128);
        assert_eq!(resource.content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing.png", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    // Neither of these paths touches the network, so a bare block_on is
    // enough runtime.
    #[test]
    fn test_fetch_data_url_skips_network() {
        let fetcher = HttpFetcher::new().unwrap();
        let resource =
            tokio_test::block_on(fetcher.fetch("data:image/gif;base64,R0lGODlh")).unwrap();
        assert_eq!(resource.bytes, 6);
    }

    #[test]
    fn test_fetch_rejects_unknown_scheme() {
        let fetcher = HttpFetcher::new().unwrap();
        let err = tokio_test::block_on(fetcher.fetch("ftp://example.com/a.png")).unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme(_)));
    }
}
