//! HTTP adapter for downloading image bytes.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::errors::MaterializeError;
use crate::domain::ports::{ImageFetchPort, MaterializeResult};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads images with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(timeout: Duration) -> MaterializeResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| MaterializeError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }

    fn map_request_error(url: &str, e: &reqwest::Error) -> MaterializeError {
        if e.is_timeout() {
            MaterializeError::Timeout {
                url: url.to_string(),
            }
        } else if e.is_connect() {
            MaterializeError::fetch(url, "failed to connect")
        } else {
            MaterializeError::fetch(url, e.to_string())
        }
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> MaterializeResult<Bytes> {
        debug!(url = %url, "Downloading image");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Image request failed");
            Self::map_request_error(url, &e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MaterializeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::map_request_error(url, &e))?;

        debug!(url = %url, size = bytes.len(), "Downloaded image");
        Ok(bytes)
    }
}
