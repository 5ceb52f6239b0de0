//! Finder configuration.
//!
//! All knobs are resolved once at startup into an explicit struct passed
//! to the orchestrator and search client at construction; nothing falls
//! back to globals per call.

use std::time::Duration;

/// Configuration for a finder run.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Anchor-text candidates requested from the model per page.
    pub max_keywords: usize,

    /// Target URLs accepted per keyword.
    pub max_target_urls: usize,

    /// SERP results to retrieve per search.
    pub search_depth: u32,

    /// Google location code (default 2840, United States).
    pub location_code: u32,

    /// Search language code.
    pub language_code: String,

    /// Search calls admitted per rolling minute, process-wide.
    pub rate_limit_per_minute: u32,

    /// Additional attempts after the first failed search call.
    pub max_retries: u32,

    /// Initial retry delay; also the fixed delay for transport errors.
    pub base_retry_delay: Duration,

    /// Cap for the exponential rate-limit backoff.
    pub max_retry_delay: Duration,

    /// Timeout for fetching the source page.
    pub fetch_timeout: Duration,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_keywords: 10,
            max_target_urls: 3,
            search_depth: 10,
            location_code: 2840,
            language_code: "en".to_string(),
            rate_limit_per_minute: 30,
            max_retries: 3,
            base_retry_delay: Duration::from_secs(1),
            max_retry_delay: Duration::from_secs(60),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

impl FinderConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from defaults and overlay the optional environment knobs
    /// (`LOCATION_CODE`, `LANGUAGE_CODE`, `SEARCH_DEPTH`,
    /// `RATE_LIMIT_PER_MINUTE`). Unparseable values keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(code) = env_parse::<u32>("LOCATION_CODE") {
            config.location_code = code;
        }
        if let Ok(code) = std::env::var("LANGUAGE_CODE") {
            if !code.is_empty() {
                config.language_code = code;
            }
        }
        if let Some(depth) = env_parse::<u32>("SEARCH_DEPTH") {
            config.search_depth = depth;
        }
        if let Some(limit) = env_parse::<u32>("RATE_LIMIT_PER_MINUTE") {
            config.rate_limit_per_minute = limit;
        }

        config
    }

    /// Set the anchor-candidate budget.
    pub fn with_max_keywords(mut self, max: usize) -> Self {
        self.max_keywords = max;
        self
    }

    /// Set the per-keyword target budget.
    pub fn with_max_target_urls(mut self, max: usize) -> Self {
        self.max_target_urls = max;
        self
    }

    /// Set the SERP depth.
    pub fn with_search_depth(mut self, depth: u32) -> Self {
        self.search_depth = depth;
        self
    }

    /// Set the search rate limit.
    pub fn with_rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = limit;
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base retry delay.
    pub fn with_base_retry_delay(mut self, delay: Duration) -> Self {
        self.base_retry_delay = delay;
        self
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    let value = std::env::var(var).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(var, value, "ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let config = FinderConfig::default();
        assert_eq!(config.max_keywords, 10);
        assert_eq!(config.max_target_urls, 3);
        assert_eq!(config.search_depth, 10);
        assert_eq!(config.rate_limit_per_minute, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_retry_delay, Duration::from_secs(1));
        assert_eq!(config.max_retry_delay, Duration::from_secs(60));
    }

    #[test]
    fn test_builders() {
        let config = FinderConfig::new()
            .with_max_keywords(5)
            .with_search_depth(20)
            .with_max_retries(1);

        assert_eq!(config.max_keywords, 5);
        assert_eq!(config.search_depth, 20);
        assert_eq!(config.max_retries, 1);
    }
}
