//! Retry policy for search calls.
//!
//! Two delay strategies, deliberately asymmetric: a server-side rate
//! limit backs off exponentially (capped), a generic transport/API error
//! retries after a fixed delay. Authentication failures are terminal and
//! return without any delay.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::FinderConfig;
use crate::error::SearchError;
use crate::traits::SiteSearcher;
use crate::types::SearchResult;

/// Retry budget and delays for one logical search call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        let config = FinderConfig::default();
        Self {
            max_retries: config.max_retries,
            base_delay: config.base_retry_delay,
            max_delay: config.max_retry_delay,
        }
    }
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Create a policy from a finder config.
    pub fn from_config(config: &FinderConfig) -> Self {
        Self::new(
            config.max_retries,
            config.base_retry_delay,
            config.max_retry_delay,
        )
    }

    /// Delay before the retry following failed attempt number `attempt`
    /// (0-based), for a rate-limit failure.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }

    /// Run `op` with this policy. `op` is invoked at most
    /// `max_retries + 1` times.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, SearchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SearchError>>,
    {
        let mut last_error = SearchError::Api("no attempts made".to_string());

        for attempt in 0..=self.max_retries {
            match op().await {
                Ok(value) => return Ok(value),
                Err(SearchError::Authentication) => return Err(SearchError::Authentication),
                Err(err @ SearchError::RateLimitExceeded) => {
                    last_error = err;
                    if attempt < self.max_retries {
                        let delay = self.backoff_delay(attempt);
                        tracing::warn!(attempt, delay_ms = delay.as_millis() as u64, "rate limited, backing off");
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(err @ SearchError::Api(_)) => {
                    last_error = err;
                    if attempt < self.max_retries {
                        tracing::warn!(attempt, error = %last_error, "search attempt failed, retrying");
                        tokio::time::sleep(self.base_delay).await;
                    }
                }
            }
        }

        Err(last_error)
    }
}

/// A searcher wrapper that applies a [`RetryPolicy`] to every call.
pub struct RetryingSearcher<S: SiteSearcher> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: SiteSearcher> RetryingSearcher<S> {
    /// Wrap a searcher.
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<S: SiteSearcher> SiteSearcher for RetryingSearcher<S> {
    async fn search_site(
        &self,
        domain: &str,
        keyword: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.policy
            .run(|| self.inner.search_site(domain, keyword))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearcher;
    use std::time::Instant;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(
            max_retries,
            Duration::from_millis(1),
            Duration::from_millis(8),
        )
    }

    #[tokio::test]
    async fn test_rate_limit_exhausts_after_max_retries_plus_one_attempts() {
        let mock = MockSearcher::new().with_sequence(vec![
            Err(SearchError::RateLimitExceeded),
            Err(SearchError::RateLimitExceeded),
            Err(SearchError::RateLimitExceeded),
            Err(SearchError::RateLimitExceeded),
        ]);

        let searcher = RetryingSearcher::new(mock, fast_policy(3));
        let err = searcher.search_site("example.com", "kw").await.unwrap_err();

        assert_eq!(err, SearchError::RateLimitExceeded);
        assert_eq!(searcher.inner.call_count(), 4);
    }

    #[tokio::test]
    async fn test_recovers_when_a_retry_succeeds() {
        let mock = MockSearcher::new().with_sequence(vec![
            Err(SearchError::RateLimitExceeded),
            Err(SearchError::Api("connection reset".to_string())),
            Ok(vec![]),
        ]);

        let searcher = RetryingSearcher::new(mock, fast_policy(3));
        let results = searcher.search_site("example.com", "kw").await.unwrap();

        assert!(results.is_empty());
        assert_eq!(searcher.inner.call_count(), 3);
    }

    #[tokio::test]
    async fn test_authentication_is_never_retried() {
        let mock = MockSearcher::new().with_sequence(vec![Err(SearchError::Authentication)]);

        // A policy with long delays: if a retry or a backoff sleep were
        // attempted, the elapsed time would betray it.
        let policy = RetryPolicy::new(3, Duration::from_secs(5), Duration::from_secs(60));
        let searcher = RetryingSearcher::new(mock, policy);

        let start = Instant::now();
        let err = searcher.search_site("example.com", "kw").await.unwrap_err();

        assert_eq!(err, SearchError::Authentication);
        assert_eq!(searcher.inner.call_count(), 1);
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_backoff_delay_is_exponential_and_capped() {
        let policy = RetryPolicy::new(5, Duration::from_secs(1), Duration::from_secs(60));

        assert_eq!(policy.backoff_delay(0), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_delay(10), Duration::from_secs(60));
    }
}
