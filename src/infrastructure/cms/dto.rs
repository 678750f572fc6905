use serde::Deserialize;

/// Error envelope returned by the CMS REST API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorBody,
}

/// Body of a CMS error response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Error class, e.g. `NotFoundError`.
    #[serde(default)]
    pub name: String,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
}
