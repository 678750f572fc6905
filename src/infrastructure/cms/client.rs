//! CMS REST client for page single types.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::ErrorResponse;
use crate::domain::entities::{AboutPage, ContentResponse, HomePage};
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentPort;

/// Home page endpoint, with every relation populated.
pub const HOME_PAGE_ENDPOINT: &str = "/api/home-page?populate=*";

/// About page endpoint, with every relation populated.
pub const ABOUT_PAGE_ENDPOINT: &str = "/api/about-page?populate=*";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Read-only client for the CMS content API.
pub struct CmsClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl std::fmt::Debug for CmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.api_token.is_some())
            .finish_non_exhaustive()
    }
}

impl CmsClient {
    /// Creates a client for the CMS at `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ContentError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ContentError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Returns the CMS origin.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_single<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ContentError> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(url = %url, "Fetching CMS content");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, url = %url, "Failed to reach CMS");
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                "failed to connect".to_string()
            } else {
                e.to_string()
            };
            ContentError::Network {
                endpoint: endpoint.to_string(),
                message,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(endpoint, status, response).await);
        }

        let envelope: ContentResponse<T> =
            response.json().await.map_err(|e| ContentError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        Ok(envelope.data)
    }

    async fn handle_error_response(
        endpoint: &str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> ContentError {
        match response.json::<ErrorResponse>().await {
            Ok(body) => warn!(
                endpoint,
                status = status.as_u16(),
                name = %body.error.name,
                message = %body.error.message,
                "CMS rejected request"
            ),
            Err(_) => warn!(endpoint, status = status.as_u16(), "CMS rejected request"),
        }

        ContentError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        }
    }
}

#[async_trait]
impl ContentPort for CmsClient {
    async fn home_page(&self) -> Result<HomePage, ContentError> {
        self.get_single(HOME_PAGE_ENDPOINT).await
    }

    async fn about_page(&self) -> Result<AboutPage, ContentError> {
        self.get_single(ABOUT_PAGE_ENDPOINT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CmsClient::new("http://localhost:1337/", None, Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1337");
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let client =
            CmsClient::new("http://localhost:1337", Some("  ".into()), Duration::from_secs(5))
                .unwrap();
        assert!(client.api_token.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_cms_is_network_error() {
        let client = CmsClient::new("http://127.0.0.1:1", None, Duration::from_secs(2)).unwrap();

        let result = client.home_page().await;

        assert!(matches!(result, Err(ContentError::Network { .. })));
    }
}
