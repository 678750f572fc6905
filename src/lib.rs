//! strapi-assets - build-time image materialization for Strapi-backed sites.
//!
//! This crate resolves CMS image descriptors to files in a static site's
//! public directory, falling back to the remote URL whenever a local copy
//! cannot be made.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "strapi-assets";
