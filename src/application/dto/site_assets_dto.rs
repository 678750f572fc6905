//! Site asset DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{MaterializedImage, SizeTier};

/// Every image the site pages reference, ready for the templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAssetManifest {
    /// Tier the images were materialized at.
    pub tier: SizeTier,
    /// Home page hero image.
    pub home_hero: MaterializedImage,
    /// About page portfolio image.
    pub about_portfolio: MaterializedImage,
}

impl SiteAssetManifest {
    /// Iterates over all images in the manifest.
    pub fn images(&self) -> impl Iterator<Item = &MaterializedImage> {
        [&self.home_hero, &self.about_portfolio].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_json_shape() {
        let manifest = SiteAssetManifest {
            tier: SizeTier::Small,
            home_hero: MaterializedImage::new("/optimized-images/hero_small.jpg", "Hero"),
            about_portfolio: MaterializedImage::empty(),
        };

        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "tier": "small",
                "home_hero": {"src": "/optimized-images/hero_small.jpg", "alt": "Hero"},
                "about_portfolio": {"src": "", "alt": ""}
            })
        );
    }
}
