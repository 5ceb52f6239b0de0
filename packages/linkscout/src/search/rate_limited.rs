//! Rate-limited searcher wrapper.
//!
//! Wraps any [`SiteSearcher`] with a governor-based limiter. The limiter
//! handle is cheaply cloneable and must be shared across every searcher
//! in the process: the external API's quota is account-wide, so
//! concurrent runs draw from one admission window.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::SearchError;
use crate::traits::SiteSearcher;
use crate::types::SearchResult;

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A process-wide admission window for search calls.
///
/// Cloning shares the underlying limiter; admission blocks the caller
/// until window capacity frees up, it never fails or drops a call.
#[derive(Clone)]
pub struct SharedRateLimiter {
    limiter: Arc<DirectRateLimiter>,
}

impl SharedRateLimiter {
    /// Admit at most `calls` per rolling minute. Zero falls back to 1.
    pub fn per_minute(calls: u32) -> Self {
        let calls = NonZeroU32::new(calls).unwrap_or(nonzero!(1u32));
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(calls))),
        }
    }

    /// Create with a custom quota.
    pub fn with_quota(quota: Quota) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Suspend until the window admits one more call.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

/// A searcher wrapper that acquires a limiter slot before every call.
pub struct RateLimitedSearcher<S: SiteSearcher> {
    inner: S,
    limiter: SharedRateLimiter,
}

impl<S: SiteSearcher> RateLimitedSearcher<S> {
    /// Wrap a searcher with a shared limiter.
    pub fn new(inner: S, limiter: SharedRateLimiter) -> Self {
        Self { inner, limiter }
    }
}

#[async_trait]
impl<S: SiteSearcher> SiteSearcher for RateLimitedSearcher<S> {
    async fn search_site(
        &self,
        domain: &str,
        keyword: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.limiter.acquire().await;
        self.inner.search_site(domain, keyword).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearcher;
    use std::time::Instant;

    #[tokio::test]
    async fn test_calls_beyond_quota_block_instead_of_failing() {
        let mock = MockSearcher::new().with_results("kw", vec![]);

        // 2 per second: third call has to wait.
        let limiter = SharedRateLimiter::with_quota(Quota::per_second(nonzero!(2u32)));
        let searcher = RateLimitedSearcher::new(mock, limiter);

        let start = Instant::now();
        for _ in 0..3 {
            searcher.search_site("example.com", "kw").await.unwrap();
        }
        let elapsed = start.elapsed();

        assert_eq!(searcher.inner.call_count(), 3);
        assert!(
            elapsed.as_millis() >= 400,
            "rate limiting not applied: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_cloned_limiter_shares_the_window() {
        let limiter = SharedRateLimiter::with_quota(Quota::per_second(nonzero!(2u32)));

        let first = RateLimitedSearcher::new(
            MockSearcher::new().with_results("kw", vec![]),
            limiter.clone(),
        );
        let second = RateLimitedSearcher::new(
            MockSearcher::new().with_results("kw", vec![]),
            limiter,
        );

        let start = Instant::now();
        first.search_site("example.com", "kw").await.unwrap();
        second.search_site("example.com", "kw").await.unwrap();
        first.search_site("example.com", "kw").await.unwrap();
        let elapsed = start.elapsed();

        // The third admission crosses both wrappers' shared window.
        assert!(
            elapsed.as_millis() >= 400,
            "limiter window not shared: {elapsed:?}"
        );
    }

    #[test]
    fn test_zero_rate_falls_back_to_one() {
        // Constructing must not panic.
        let _ = SharedRateLimiter::per_minute(0);
    }
}
