//! Domain entity definitions.

mod content;
mod image;

pub use content::{
    AboutPage, ContentResponse, HomePage, InlineNode, LinkItem, ListFormat, ListItemNode,
    RichTextNode, TextNode,
};
pub use image::{
    ImageDescriptor, ImageFormat, ImageFormats, MaterializedImage, SizeTier, UnknownTier,
};
