//! Infrastructure layer with external service adapters.

/// CMS content API client.
pub mod cms;
/// Application configuration.
pub mod config;
/// Image materialization (naming, storage, downloads).
pub mod image;

pub use cms::CmsClient;
pub use config::{AppConfig, CliArgs, Command, ConfigLoader, LogLevel};
pub use image::{
    AssetStore, HttpImageFetcher, ImageMaterializer, Materialization, MaterializerConfig,
    NamingStrategy,
};
