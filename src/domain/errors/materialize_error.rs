//! Image materialization error types.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a single image could not be materialized locally.
///
/// None of these escape the materializer; each one turns into a fallback to
/// the remote URL.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum MaterializeError {
    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),

    #[error("request to {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MaterializeError {
    /// Creates a fetch error.
    #[must_use]
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a persist error.
    #[must_use]
    pub fn persist(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }

    /// Returns whether the remote side is at fault.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::Timeout { .. } | Self::Status { .. }
        )
    }
}
