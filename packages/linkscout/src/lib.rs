//! Internal-link suggestion library.
//!
//! Given a source URL, Linkscout scrapes the page, asks Gemini for
//! anchor-text candidates, then searches the page's own root domain via
//! the DataForSEO SERP API to find plausible target pages for each
//! candidate. The result is a ranked list of suggestions plus the
//! non-fatal errors collected along the way.
//!
//! # Usage
//!
//! ```rust,ignore
//! use linkscout::{
//!     DataForSeoSearcher, FinderConfig, GeminiAnchorExtractor, HttpFetcher,
//!     LinkFinder, RetryPolicy, SearcherExt, SharedRateLimiter,
//! };
//!
//! let config = FinderConfig::from_env();
//! let limiter = SharedRateLimiter::per_minute(config.rate_limit_per_minute);
//!
//! let searcher = DataForSeoSearcher::from_config(client, &config)
//!     .retrying(RetryPolicy::from_config(&config))
//!     .rate_limited(limiter);
//!
//! let finder = LinkFinder::new(HttpFetcher::new(), extractor, searcher)
//!     .with_config(config);
//!
//! let report = finder.find_opportunities("https://example.com/post").await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator seams (PageFetcher, AnchorExtractor, SiteSearcher)
//! - [`types`] - Data model (PageContent, LinkSuggestion, FindReport)
//! - [`finder`] - The orchestration pipeline
//! - [`search`] - Search middleware: retry policy and shared rate limiter
//! - [`fetch`] - HTTP page fetcher
//! - [`extract`] - Gemini-backed anchor extraction
//! - [`urls`] - Root-domain extraction, normalization, validation
//! - [`testing`] - Mock implementations for tests

pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod finder;
pub mod observer;
pub mod search;
pub mod testing;
pub mod traits;
pub mod types;
pub mod urls;

// Re-export core types at crate root
pub use config::FinderConfig;
pub use credentials::{Credentials, SecretString};
pub use error::{
    CredentialsError, ExtractError, FinderError, FinderResult, ScrapeError, SearchError,
};
pub use extract::GeminiAnchorExtractor;
pub use fetch::HttpFetcher;
pub use finder::LinkFinder;
pub use observer::{FinderObserver, NoopObserver, Stage};
pub use search::{
    DataForSeoSearcher, RateLimitedSearcher, RetryPolicy, RetryingSearcher, SearcherExt,
    SharedRateLimiter,
};
pub use traits::{AnchorExtractor, PageFetcher, SiteSearcher};
pub use types::{
    AnchorCandidate, FindReport, LinkSuggestion, PageContent, SearchResult, TargetUrl,
};
pub use urls::{extract_domain, normalize_url, validate_url};
