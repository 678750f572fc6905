//! CMS content API error types.

use thiserror::Error;

/// Failures while fetching page content from the CMS.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ContentError {
    #[error("network error fetching {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("failed to decode {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("unexpected content client error: {message}")]
    Unexpected { message: String },
}

impl ContentError {
    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether a later attempt could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Decode { .. } | Self::Unexpected { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_statuses() {
        let status = |status| ContentError::Status {
            endpoint: "/api/home-page".into(),
            status,
        };
        assert!(status(503).is_recoverable());
        assert!(status(429).is_recoverable());
        assert!(!status(404).is_recoverable());
        assert!(!ContentError::unexpected("boom").is_recoverable());
    }
}
