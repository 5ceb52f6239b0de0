//! Testing utilities including mock implementations.
//!
//! Mocks for every collaborator trait so the pipeline can be exercised
//! without network or model calls. All builders are consuming; call
//! tracking uses shared interior mutability so assertions work after the
//! mock has been moved into a finder.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{ExtractError, ScrapeError, SearchError};
use crate::traits::{AnchorExtractor, PageFetcher, SiteSearcher};
use crate::types::{AnchorCandidate, PageContent, SearchResult};

/// A mock page fetcher with scripted pages.
#[derive(Default)]
pub struct MockFetcher {
    pages: RwLock<HashMap<String, PageContent>>,
    failure: Option<ScrapeError>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page, keyed by its URL.
    pub fn with_page(self, page: PageContent) -> Self {
        self.pages.write().unwrap().insert(page.url.clone(), page);
        self
    }

    /// Fail every fetch with this error.
    pub fn failing_with(mut self, error: ScrapeError) -> Self {
        self.failure = Some(error);
        self
    }

    /// URLs fetched so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetches made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<PageContent, ScrapeError> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Http {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// A mock anchor extractor with scripted candidates.
#[derive(Default)]
pub struct MockAnchorExtractor {
    candidates: RwLock<Vec<AnchorCandidate>>,
    failure: Option<ExtractError>,
    calls: Arc<RwLock<Vec<usize>>>,
}

impl MockAnchorExtractor {
    /// Create a mock that returns no candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the candidates to return.
    pub fn with_candidates(self, candidates: Vec<AnchorCandidate>) -> Self {
        *self.candidates.write().unwrap() = candidates;
        self
    }

    /// Fail every extraction with this error.
    pub fn failing_with(mut self, error: ExtractError) -> Self {
        self.failure = Some(error);
        self
    }

    /// The `max_suggestions` argument of each call made.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.read().unwrap().clone()
    }

    /// Number of extractions made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl AnchorExtractor for MockAnchorExtractor {
    async fn extract(
        &self,
        _text: &str,
        _title: &str,
        _domain: &str,
        max_suggestions: usize,
    ) -> Result<Vec<AnchorCandidate>, ExtractError> {
        self.calls.write().unwrap().push(max_suggestions);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        Ok(self.candidates.read().unwrap().clone())
    }
}

/// A mock site searcher.
///
/// Two scripting modes: per-keyword results/errors, and a call-ordered
/// sequence of outcomes (used by the retry tests, where the same call is
/// made repeatedly). The sequence, when non-empty, wins.
#[derive(Default)]
pub struct MockSearcher {
    results: RwLock<HashMap<String, Vec<SearchResult>>>,
    errors: RwLock<HashMap<String, SearchError>>,
    sequence: Mutex<VecDeque<Result<Vec<SearchResult>, SearchError>>>,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockSearcher {
    /// Create an empty mock searcher; unknown keywords return no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script results for a keyword.
    pub fn with_results(self, keyword: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(keyword.to_string(), results);
        self
    }

    /// Script an error for a keyword.
    pub fn with_error(self, keyword: &str, error: SearchError) -> Self {
        self.errors
            .write()
            .unwrap()
            .insert(keyword.to_string(), error);
        self
    }

    /// Script a call-ordered sequence of outcomes, consumed one per call.
    pub fn with_sequence(self, outcomes: Vec<Result<Vec<SearchResult>, SearchError>>) -> Self {
        *self.sequence.lock().unwrap() = outcomes.into();
        self
    }

    /// The `(domain, keyword)` pair of each call made.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }

    /// Number of searches made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl SiteSearcher for MockSearcher {
    async fn search_site(
        &self,
        domain: &str,
        keyword: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.calls
            .write()
            .unwrap()
            .push((domain.to_string(), keyword.to_string()));

        if let Some(outcome) = self.sequence.lock().unwrap().pop_front() {
            return outcome;
        }

        if let Some(error) = self.errors.read().unwrap().get(keyword) {
            return Err(error.clone());
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(keyword)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_searcher_sequence_wins_over_map() {
        let searcher = MockSearcher::new()
            .with_results("kw", vec![SearchResult::new("https://example.com/map", "M", 1)])
            .with_sequence(vec![Ok(vec![])]);

        let first = searcher.search_site("example.com", "kw").await.unwrap();
        assert!(first.is_empty());

        // Sequence drained; the per-keyword map takes over.
        let second = searcher.search_site("example.com", "kw").await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(searcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_fetcher_unknown_url_is_a_404() {
        let fetcher = MockFetcher::new();
        let err = fetcher.fetch("https://example.com/missing").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Http { status: 404, .. }));
        assert_eq!(fetcher.calls(), vec!["https://example.com/missing"]);
    }
}
