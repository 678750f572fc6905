//! Domain error types.

mod content_error;
mod materialize_error;

pub use content_error::ContentError;
pub use materialize_error::MaterializeError;
