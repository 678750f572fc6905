mod content_port;
mod image_port;

pub use content_port::ContentPort;
pub use image_port::{ImageFetchPort, ImageResolverPort, MaterializeResult};
