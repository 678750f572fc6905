//! Site asset build use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::SiteAssetManifest;
use crate::domain::entities::SizeTier;
use crate::domain::errors::ContentError;
use crate::domain::ports::{ContentPort, ImageResolverPort};

/// Fetches the site pages and materializes the images they reference.
#[derive(Clone)]
pub struct BuildSiteAssetsUseCase {
    content_port: Arc<dyn ContentPort>,
    image_resolver: Arc<dyn ImageResolverPort>,
}

impl BuildSiteAssetsUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        content_port: Arc<dyn ContentPort>,
        image_resolver: Arc<dyn ImageResolverPort>,
    ) -> Self {
        Self {
            content_port,
            image_resolver,
        }
    }

    /// Runs the build at `tier`.
    ///
    /// Page content is required, so content errors propagate. Image problems
    /// never do; they degrade inside the resolver.
    ///
    /// # Errors
    /// Returns error if either page cannot be fetched.
    pub async fn execute(&self, tier: SizeTier) -> Result<SiteAssetManifest, ContentError> {
        debug!(tier = %tier, "Fetching site pages");

        let (home, about) =
            tokio::try_join!(self.content_port.home_page(), self.content_port.about_page())
                .map_err(|e| {
                    warn!(
                        error = %e,
                        recoverable = e.is_recoverable(),
                        "Failed to fetch site pages"
                    );
                    e
                })?;

        let (home_hero, about_portfolio) = tokio::join!(
            self.image_resolver.resolve(home.hero_image.as_ref(), tier),
            self.image_resolver
                .resolve(about.portfolio_image.as_ref(), tier),
        );

        let manifest = SiteAssetManifest {
            tier,
            home_hero,
            about_portfolio,
        };

        info!(
            tier = %tier,
            images = manifest.images().count(),
            "Site assets ready"
        );

        Ok(manifest)
    }
}
