//! Image handling infrastructure.
//!
//! This module provides:
//! - Deterministic asset naming
//! - A flat on-disk asset store with atomic writes
//! - HTTP downloads
//! - The materializer tying them together

pub mod asset_store;
pub mod http_fetcher;
pub mod materializer;
pub mod naming;

pub use asset_store::AssetStore;
pub use http_fetcher::{DEFAULT_FETCH_TIMEOUT, HttpImageFetcher};
pub use materializer::{ASSET_DIR_NAME, ImageMaterializer, Materialization, MaterializerConfig};
pub use naming::{NamingStrategy, absolute_url, asset_filename};
