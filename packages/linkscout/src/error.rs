//! Typed errors for the link-suggestion pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Only URL validation and the
//! fetch stage abort a run; extraction and search failures are downgraded
//! into the report's error list by the orchestrator.

use thiserror::Error;

/// Errors that abort a whole finder run.
#[derive(Debug, Error)]
pub enum FinderError {
    /// Source URL rejected before any I/O
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Fetching the source page failed; there is no partial result
    #[error("scraping failed: {0}")]
    Scrape(#[from] ScrapeError),
}

/// Errors from fetching and reading the source page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    /// URL could not be parsed into a request
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Request exceeded the fetch timeout
    #[error("request timed out after {seconds} seconds: {url}")]
    Timeout { url: String, seconds: u64 },

    /// Server answered with a non-success status
    #[error("HTTP error {status}: {url}")]
    Http { status: u16, url: String },

    /// Connection-level failure
    #[error("failed to fetch URL: {url} - {message}")]
    Transport { url: String, message: String },

    /// Page yielded no extractable text
    #[error("no extractable content found at: {url}")]
    EmptyContent { url: String },
}

/// Errors from the anchor-text extraction stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Extractor not usable (missing API key, bad settings)
    #[error("extractor configuration error: {0}")]
    Config(String),

    /// Model call failed (network or API-level)
    #[error("Gemini error: {0}")]
    Api(String),

    /// Model answered but the response could not be parsed
    #[error("could not parse Gemini response: {0}")]
    Parse(String),
}

/// Errors from one site-scoped search call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Credentials rejected by the API; never retried
    #[error("authentication failed: invalid search API credentials")]
    Authentication,

    /// Server-side quota exceeded; retried with exponential backoff
    #[error("search API rate limit exceeded")]
    RateLimitExceeded,

    /// Generic failure: bad status, transport error, malformed response
    #[error("search API error: {0}")]
    Api(String),
}

impl From<dataforseo_client::DataForSeoError> for SearchError {
    fn from(err: dataforseo_client::DataForSeoError) -> Self {
        use dataforseo_client::DataForSeoError;
        match err {
            DataForSeoError::Authentication => SearchError::Authentication,
            DataForSeoError::RateLimit => SearchError::RateLimitExceeded,
            DataForSeoError::Credentials(msg) => SearchError::Api(msg),
            DataForSeoError::Api(msg) => SearchError::Api(msg),
            DataForSeoError::Http(e) => SearchError::Api(e.to_string()),
        }
    }
}

/// Errors from loading credentials out of the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    /// Required variable absent or empty
    #[error("missing required environment variable: {var}")]
    Missing { var: String },
}

/// Result type alias for finder runs.
pub type FinderResult<T> = std::result::Result<T, FinderError>;

/// Result type alias for search calls.
pub type SearchCallResult<T> = std::result::Result<T, SearchError>;
