//! Use case implementations.

mod build_site_assets_use_case;
mod materialize_descriptors_use_case;

pub use build_site_assets_use_case::BuildSiteAssetsUseCase;
pub use materialize_descriptors_use_case::MaterializeDescriptorsUseCase;
