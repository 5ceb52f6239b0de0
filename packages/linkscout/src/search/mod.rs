//! Site-scoped search: raw searcher plus the throttling middleware.
//!
//! The discipline around the external SERP API lives here, composed
//! explicitly at construction time: a process-wide rate limiter wrapping
//! a retry policy wrapping the raw transport call.
//!
//! ```rust,ignore
//! let limiter = SharedRateLimiter::per_minute(config.rate_limit_per_minute);
//! let searcher = DataForSeoSearcher::from_config(client, &config)
//!     .retrying(RetryPolicy::from_config(&config))
//!     .rate_limited(limiter);
//! ```

pub mod dataforseo;
pub mod rate_limited;
pub mod retry;

pub use dataforseo::DataForSeoSearcher;
pub use rate_limited::{RateLimitedSearcher, SharedRateLimiter};
pub use retry::{RetryPolicy, RetryingSearcher};

use crate::traits::SiteSearcher;

/// Extension methods for composing search middleware.
pub trait SearcherExt: SiteSearcher + Sized {
    /// Wrap this searcher with a retry policy.
    fn retrying(self, policy: RetryPolicy) -> RetryingSearcher<Self> {
        RetryingSearcher::new(self, policy)
    }

    /// Wrap this searcher with a shared rate limiter.
    fn rate_limited(self, limiter: SharedRateLimiter) -> RateLimitedSearcher<Self> {
        RateLimitedSearcher::new(self, limiter)
    }
}

impl<S: SiteSearcher + Sized> SearcherExt for S {}
