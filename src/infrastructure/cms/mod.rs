//! CMS content API client.

mod client;
mod dto;

pub use client::{ABOUT_PAGE_ENDPOINT, CmsClient, HOME_PAGE_ENDPOINT};
