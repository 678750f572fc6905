//! Data transfer objects for the application layer.

mod site_assets_dto;

pub use site_assets_dto::SiteAssetManifest;
