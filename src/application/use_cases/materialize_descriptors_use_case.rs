//! Offline descriptor materialization use case.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{ImageDescriptor, MaterializedImage, SizeTier};
use crate::domain::ports::ImageResolverPort;

/// Materializes descriptors supplied directly, e.g. from an exported JSON
/// file, without talking to the content API.
#[derive(Clone)]
pub struct MaterializeDescriptorsUseCase {
    image_resolver: Arc<dyn ImageResolverPort>,
}

impl MaterializeDescriptorsUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(image_resolver: Arc<dyn ImageResolverPort>) -> Self {
        Self { image_resolver }
    }

    /// Resolves every descriptor; output order matches input order.
    pub async fn execute(
        &self,
        descriptors: &[ImageDescriptor],
        tier: SizeTier,
    ) -> Vec<MaterializedImage> {
        let images = self.image_resolver.resolve_all(descriptors, tier).await;
        info!(count = images.len(), tier = %tier, "Descriptors materialized");
        images
    }

    /// Parses a JSON array of descriptors and resolves them.
    ///
    /// # Errors
    /// Returns error if `json` is not an array of descriptors.
    pub async fn execute_json(
        &self,
        json: &str,
        tier: SizeTier,
    ) -> Result<Vec<MaterializedImage>, serde_json::Error> {
        let descriptors: Vec<ImageDescriptor> = serde_json::from_str(json)?;
        Ok(self.execute(&descriptors, tier).await)
    }
}
