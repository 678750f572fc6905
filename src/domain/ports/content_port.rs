//! CMS content port definition.

use async_trait::async_trait;

use crate::domain::entities::{AboutPage, HomePage};
use crate::domain::errors::ContentError;

/// Port for reading page content from the CMS.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentPort: Send + Sync {
    /// Fetches the home page single type.
    async fn home_page(&self) -> Result<HomePage, ContentError>;

    /// Fetches the about page single type.
    async fn about_page(&self) -> Result<AboutPage, ContentError>;
}
