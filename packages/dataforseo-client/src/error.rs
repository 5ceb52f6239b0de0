//! Error types for the DataForSEO client.

use thiserror::Error;

/// Result type for DataForSEO client operations.
pub type Result<T> = std::result::Result<T, DataForSeoError>;

/// DataForSEO client errors.
#[derive(Debug, Error)]
pub enum DataForSeoError {
    /// Credentials missing or empty (caught at construction, before any request)
    #[error("DataForSEO credentials not configured: {0}")]
    Credentials(String),

    /// API rejected the credentials (HTTP 401)
    #[error("invalid DataForSEO credentials")]
    Authentication,

    /// Server-side rate limit exceeded (HTTP 429)
    #[error("DataForSEO rate limit exceeded")]
    RateLimit,

    /// API-level error (non-success status code or malformed payload)
    #[error("DataForSEO API error: {0}")]
    Api(String),

    /// Transport failure (connection error, timeout)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
