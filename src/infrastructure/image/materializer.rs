//! Build-time image materialization.
//!
//! Resolves a CMS image descriptor to a local file under the site's public
//! directory: pick the tier variant, download it once, store it under a
//! deterministic name and hand back a root-relative `src`. Any failure
//! degrades to the remote URL so the page still renders.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{ImageDescriptor, MaterializedImage, SizeTier};
use crate::domain::errors::MaterializeError;
use crate::domain::ports::{ImageFetchPort, ImageResolverPort, MaterializeResult};

use super::asset_store::AssetStore;
use super::http_fetcher::{DEFAULT_FETCH_TIMEOUT, HttpImageFetcher};
use super::naming::{NamingStrategy, absolute_url, asset_filename};

/// Directory name, under the public directory, holding materialized images.
pub const ASSET_DIR_NAME: &str = "optimized-images";

/// Configuration for the image materializer.
#[derive(Debug, Clone)]
pub struct MaterializerConfig {
    /// CMS origin prepended to every image path, e.g. `http://localhost:1337`.
    pub origin: String,
    /// Directory the images are written to.
    pub output_dir: PathBuf,
    /// Root-relative URL prefix under which `output_dir` is served.
    pub public_prefix: String,
    /// Filename derivation.
    pub naming: NamingStrategy,
    /// Per-request timeout.
    pub fetch_timeout: Duration,
}

impl MaterializerConfig {
    /// Creates a config writing to `{public_dir}/optimized-images`, served at
    /// `/optimized-images`.
    #[must_use]
    pub fn new(origin: impl Into<String>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
            output_dir: public_dir.into().join(ASSET_DIR_NAME),
            public_prefix: format!("/{ASSET_DIR_NAME}"),
            naming: NamingStrategy::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Sets the naming strategy.
    #[must_use]
    pub fn with_naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = naming;
        self
    }

    /// Sets the fetch timeout.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

/// What happened while materializing one image.
///
/// Every variant carries the image the renderer should use; the variant
/// itself only matters for logging and tests.
#[derive(Debug)]
pub enum Materialization {
    /// No descriptor was given; nothing was attempted.
    Missing,
    /// The file already existed.
    Cached {
        /// Local reference.
        image: MaterializedImage,
        /// File on disk.
        path: PathBuf,
    },
    /// The file was downloaded and written.
    Downloaded {
        /// Local reference.
        image: MaterializedImage,
        /// File on disk.
        path: PathBuf,
        /// Bytes written.
        size: usize,
    },
    /// Materialization failed; `image.src` is the remote URL.
    Fallback {
        /// Remote reference.
        image: MaterializedImage,
        /// Why the local copy could not be made.
        error: MaterializeError,
    },
}

impl Materialization {
    /// Returns the image to render.
    #[must_use]
    pub fn into_image(self) -> MaterializedImage {
        match self {
            Self::Missing => MaterializedImage::empty(),
            Self::Cached { image, .. }
            | Self::Downloaded { image, .. }
            | Self::Fallback { image, .. } => image,
        }
    }

    fn log(&self, tier: SizeTier) {
        match self {
            Self::Missing => warn!(tier = %tier, "No image descriptor provided"),
            Self::Cached { path, .. } => {
                debug!(tier = %tier, path = %path.display(), "Image already materialized");
            }
            Self::Downloaded { path, size, .. } => {
                info!(tier = %tier, path = %path.display(), size, "Materialized image");
            }
            Self::Fallback { image, error } => {
                error!(
                    tier = %tier,
                    src = %image.src,
                    error = %error,
                    "Failed to materialize image, using remote URL"
                );
            }
        }
    }
}

/// Downloads CMS images into the site's public directory.
pub struct ImageMaterializer {
    config: MaterializerConfig,
    store: AssetStore,
    fetcher: Arc<dyn ImageFetchPort>,
}

impl std::fmt::Debug for ImageMaterializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageMaterializer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ImageMaterializer {
    /// Creates a materializer using `fetcher` for downloads.
    #[must_use]
    pub fn new(config: MaterializerConfig, fetcher: Arc<dyn ImageFetchPort>) -> Self {
        let store = AssetStore::new(config.output_dir.clone());
        Self {
            config,
            store,
            fetcher,
        }
    }

    /// Creates a materializer downloading over HTTP.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: MaterializerConfig) -> MaterializeResult<Self> {
        let fetcher = Arc::new(HttpImageFetcher::new(config.fetch_timeout)?);
        Ok(Self::new(config, fetcher))
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &MaterializerConfig {
        &self.config
    }

    /// Materializes one image and reports how.
    ///
    /// Performs no logging; [`ImageResolverPort::resolve`] layers that on top.
    pub async fn materialize(
        &self,
        descriptor: Option<&ImageDescriptor>,
        tier: SizeTier,
    ) -> Materialization {
        let Some(descriptor) = descriptor else {
            return Materialization::Missing;
        };

        let source = descriptor.source_path(tier);
        let remote_url = absolute_url(&self.config.origin, source);
        let filename = asset_filename(source, tier, self.config.naming);
        let alt = descriptor.alt_text();

        let _guard = self.store.lock(&filename).await;

        if self.store.contains(&filename).await {
            return Materialization::Cached {
                image: MaterializedImage::new(self.public_src(&filename), alt),
                path: self.store.path_for(&filename),
            };
        }

        match self.download(&remote_url, &filename).await {
            Ok((path, size)) => Materialization::Downloaded {
                image: MaterializedImage::new(self.public_src(&filename), alt),
                path,
                size,
            },
            Err(error) => Materialization::Fallback {
                image: MaterializedImage::new(remote_url, alt),
                error,
            },
        }
    }

    async fn download(&self, url: &str, filename: &str) -> MaterializeResult<(PathBuf, usize)> {
        self.store.ensure_dir().await?;
        let bytes = self.fetcher.fetch(url).await?;
        let size = bytes.len();
        let path = self.store.write(filename, bytes).await?;
        Ok((path, size))
    }

    fn public_src(&self, filename: &str) -> String {
        format!("{}/{filename}", self.config.public_prefix.trim_end_matches('/'))
    }
}

#[async_trait]
impl ImageResolverPort for ImageMaterializer {
    #[tracing::instrument(skip_all, fields(tier = %tier))]
    async fn resolve(
        &self,
        descriptor: Option<&ImageDescriptor>,
        tier: SizeTier,
    ) -> MaterializedImage {
        let outcome = self.materialize(descriptor, tier).await;
        outcome.log(tier);
        outcome.into_image()
    }

    async fn resolve_all(
        &self,
        descriptors: &[ImageDescriptor],
        tier: SizeTier,
    ) -> Vec<MaterializedImage> {
        debug!(count = descriptors.len(), tier = %tier, "Resolving image batch");
        join_all(
            descriptors
                .iter()
                .map(|descriptor| self.resolve(Some(descriptor), tier)),
        )
        .await
    }
}
