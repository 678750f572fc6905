//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{ImageDescriptor, MaterializedImage, SizeTier};
pub use errors::{ContentError, MaterializeError};
pub use ports::{ContentPort, ImageFetchPort, ImageResolverPort};
