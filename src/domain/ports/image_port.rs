//! Port definitions for image fetching and materialization.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::{ImageDescriptor, MaterializedImage, SizeTier};
use crate::domain::errors::MaterializeError;

/// Result type for image operations.
pub type MaterializeResult<T> = std::result::Result<T, MaterializeError>;

/// Port for downloading raw image bytes.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches the full body of `url`.
    ///
    /// Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> MaterializeResult<Bytes>;
}

/// Port for turning CMS image descriptors into renderer-ready references.
///
/// Implementations never fail; problems degrade to the best available `src`.
#[async_trait]
pub trait ImageResolverPort: Send + Sync {
    /// Resolves one descriptor at the given tier.
    async fn resolve(&self, descriptor: Option<&ImageDescriptor>, tier: SizeTier)
    -> MaterializedImage;

    /// Resolves every descriptor concurrently, preserving input order.
    async fn resolve_all(
        &self,
        descriptors: &[ImageDescriptor],
        tier: SizeTier,
    ) -> Vec<MaterializedImage>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted response for [`MockImageFetcher`].
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        /// Body returned with a 200.
        Body(Vec<u8>),
        /// Non-success status.
        Status(u16),
        /// Connection-level failure.
        Unreachable,
    }

    /// Mock fetcher that records how often each URL was requested.
    pub struct MockImageFetcher {
        responses: HashMap<String, MockResponse>,
        default: MockResponse,
        delay: Option<Duration>,
        calls: Arc<AtomicUsize>,
        requested: parking_lot::Mutex<Vec<String>>,
    }

    impl MockImageFetcher {
        /// Creates a fetcher answering every URL with `body`.
        pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
            Self {
                responses: HashMap::new(),
                default: MockResponse::Body(body.into()),
                delay: None,
                calls: Arc::new(AtomicUsize::new(0)),
                requested: parking_lot::Mutex::new(Vec::new()),
            }
        }

        /// Creates a fetcher answering every URL with `status`.
        pub fn with_status(status: u16) -> Self {
            Self {
                default: MockResponse::Status(status),
                ..Self::with_body(Vec::new())
            }
        }

        /// Creates a fetcher that cannot connect.
        pub fn unreachable() -> Self {
            Self {
                default: MockResponse::Unreachable,
                ..Self::with_body(Vec::new())
            }
        }

        /// Scripts the response for one URL.
        #[must_use]
        pub fn respond(mut self, url: impl Into<String>, response: MockResponse) -> Self {
            self.responses.insert(url.into(), response);
            self
        }

        /// Delays every response.
        #[must_use]
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Number of fetches performed.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// URLs fetched, in request order.
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().clone()
        }
    }

    #[async_trait]
    impl ImageFetchPort for MockImageFetcher {
        async fn fetch(&self, url: &str) -> MaterializeResult<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().push(url.to_string());

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            match self.responses.get(url).unwrap_or(&self.default) {
                MockResponse::Body(body) => Ok(Bytes::from(body.clone())),
                MockResponse::Status(status) => Err(MaterializeError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                MockResponse::Unreachable => Err(MaterializeError::fetch(url, "connection refused")),
            }
        }
    }

    /// Resolver that maps every descriptor to its raw source path.
    #[derive(Default)]
    pub struct MockImageResolver {
        calls: AtomicUsize,
    }

    impl MockImageResolver {
        /// Creates new mock.
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of single resolutions performed.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageResolverPort for MockImageResolver {
        async fn resolve(
            &self,
            descriptor: Option<&ImageDescriptor>,
            tier: SizeTier,
        ) -> MaterializedImage {
            self.calls.fetch_add(1, Ordering::SeqCst);
            descriptor.map_or_else(MaterializedImage::empty, |d| {
                MaterializedImage::new(d.source_path(tier), d.alt_text())
            })
        }

        async fn resolve_all(
            &self,
            descriptors: &[ImageDescriptor],
            tier: SizeTier,
        ) -> Vec<MaterializedImage> {
            let mut out = Vec::with_capacity(descriptors.len());
            for descriptor in descriptors {
                out.push(self.resolve(Some(descriptor), tier).await);
            }
            out
        }
    }
}
