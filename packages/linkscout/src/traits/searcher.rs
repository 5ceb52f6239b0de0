//! Site-scoped searcher trait.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::SearchResult;

/// Finds pages under a domain that mention a keyword.
///
/// One call performs one logical search; results come back in SERP rank
/// order. Rate limiting and retry discipline are layered on top of this
/// trait by wrappers ([`crate::search::RateLimitedSearcher`],
/// [`crate::search::RetryingSearcher`]) composed at construction time,
/// so implementations stay single-request.
#[async_trait]
pub trait SiteSearcher: Send + Sync {
    /// Search `domain` for pages mentioning `keyword`.
    async fn search_site(
        &self,
        domain: &str,
        keyword: &str,
    ) -> Result<Vec<SearchResult>, SearchError>;
}
