//! Link-finding orchestrator.
//!
//! Sequences the pipeline for one source URL: validate → fetch → extract
//! anchors → one site-scoped search per anchor → assemble the report.
//! Stages are strictly sequential. Only validation and the fetch abort a
//! run; extraction and per-keyword search failures are downgraded into
//! the report's error list so partial results always come back.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::FinderConfig;
use crate::error::{FinderError, FinderResult};
use crate::observer::{FinderObserver, NoopObserver, Stage};
use crate::traits::{AnchorExtractor, PageFetcher, SiteSearcher};
use crate::types::{FindReport, LinkSuggestion, TargetUrl};
use crate::urls::{normalize_url, validate_url};

/// Finds internal linking opportunities for a page.
pub struct LinkFinder<F, A, S> {
    fetcher: F,
    extractor: A,
    searcher: S,
    config: FinderConfig,
    observer: Arc<dyn FinderObserver>,
}

impl<F, A, S> LinkFinder<F, A, S>
where
    F: PageFetcher,
    A: AnchorExtractor,
    S: SiteSearcher,
{
    /// Create a finder with the default config and no observer.
    pub fn new(fetcher: F, extractor: A, searcher: S) -> Self {
        Self {
            fetcher,
            extractor,
            searcher,
            config: FinderConfig::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the config.
    pub fn with_config(mut self, config: FinderConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a progress observer.
    pub fn with_observer(mut self, observer: Arc<dyn FinderObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The fetcher this finder uses.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The extractor this finder uses.
    pub fn extractor(&self) -> &A {
        &self.extractor
    }

    /// The searcher this finder uses.
    pub fn searcher(&self) -> &S {
        &self.searcher
    }

    /// Run the pipeline for one source URL.
    ///
    /// Returns the assembled report, or an error when the URL is invalid
    /// or the source page cannot be fetched. Every other failure is
    /// reported inside [`FindReport::errors`].
    pub async fn find_opportunities(&self, source_url: &str) -> FinderResult<FindReport> {
        if !validate_url(source_url) {
            return Err(FinderError::InvalidUrl {
                url: source_url.to_string(),
            });
        }

        let mut report = FindReport::new(source_url);

        self.observer.on_status(Stage::Scraping);
        info!(url = %source_url, "scraping source page");
        let page = self.fetcher.fetch(source_url).await?;
        let normalized_source = normalize_url(source_url);

        self.observer.on_status(Stage::Analyzing);
        info!(domain = %page.domain, text_len = page.text.len(), "extracting anchor candidates");
        let candidates = match self
            .extractor
            .extract(&page.text, &page.title, &page.domain, self.config.max_keywords)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "anchor extraction failed");
                report.errors.push(format!("Anchor extraction error: {e}"));
                self.observer.on_status(Stage::Complete);
                return Ok(report);
            }
        };

        if candidates.is_empty() {
            report
                .errors
                .push("The model could not extract any anchor text suggestions".to_string());
            self.observer.on_status(Stage::Complete);
            return Ok(report);
        }

        info!(count = candidates.len(), "anchor candidates extracted");

        self.observer.on_status(Stage::Searching);
        let total = candidates.len();

        for (index, candidate) in candidates
            .into_iter()
            .take(self.config.max_keywords)
            .enumerate()
        {
            self.observer.on_keyword(index + 1, total, &candidate.text);
            info!(anchor = %candidate.text, "searching for target pages");

            let mut suggestion = LinkSuggestion::for_candidate(candidate);

            match self
                .searcher
                .search_site(&page.domain, &suggestion.anchor_text)
                .await
            {
                Ok(results) => {
                    for result in results {
                        // Never suggest linking the page to itself.
                        if normalize_url(&result.url) == normalized_source {
                            continue;
                        }

                        suggestion.target_urls.push(TargetUrl::from(result));
                        if suggestion.target_urls.len() >= self.config.max_target_urls {
                            break;
                        }
                    }
                }
                Err(e) => {
                    warn!(anchor = %suggestion.anchor_text, error = %e, "keyword search failed");
                    report
                        .errors
                        .push(format!("Search error for '{}': {e}", suggestion.anchor_text));
                }
            }

            // Keep the entry even with zero targets so the caller sees
            // what the model suggested.
            report.suggestions.push(suggestion);
        }

        self.observer.on_status(Stage::Complete);
        info!(
            suggestions = report.suggestions.len(),
            targets = report.target_count(),
            errors = report.errors.len(),
            "run complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ScrapeError, SearchError};
    use crate::testing::{MockAnchorExtractor, MockFetcher, MockSearcher};
    use crate::types::{AnchorCandidate, PageContent, SearchResult};

    fn page(url: &str) -> PageContent {
        PageContent::new(url, "example.com")
            .with_title("Example")
            .with_text("Some page text about rust crates and cargo workspaces.")
    }

    fn finder_with(
        fetcher: MockFetcher,
        extractor: MockAnchorExtractor,
        searcher: MockSearcher,
    ) -> LinkFinder<MockFetcher, MockAnchorExtractor, MockSearcher> {
        LinkFinder::new(fetcher, extractor, searcher)
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_call() {
        let fetcher = MockFetcher::new();
        let finder = finder_with(fetcher, MockAnchorExtractor::new(), MockSearcher::new());

        let err = finder.find_opportunities("ftp://example.com").await.unwrap_err();

        assert!(matches!(err, FinderError::InvalidUrl { .. }));
        assert_eq!(finder.fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_the_run() {
        let fetcher = MockFetcher::new().failing_with(ScrapeError::Http {
            status: 404,
            url: "https://example.com/gone".to_string(),
        });
        let finder = finder_with(fetcher, MockAnchorExtractor::new(), MockSearcher::new());

        let err = finder
            .find_opportunities("https://example.com/gone")
            .await
            .unwrap_err();

        assert!(matches!(err, FinderError::Scrape(_)));
    }

    #[tokio::test]
    async fn test_self_link_is_excluded_in_order() {
        let source = "https://example.com/post";
        let fetcher = MockFetcher::new().with_page(page(source));
        let extractor = MockAnchorExtractor::new()
            .with_candidates(vec![AnchorCandidate::new("rust crates", 0.9, "topic")]);
        let searcher = MockSearcher::new().with_results(
            "rust crates",
            vec![
                // Normalizes equal to the source despite the noise.
                SearchResult::new("http://www.Example.com/post/", "Self", 1),
                SearchResult::new("https://example.com/a", "A", 2),
                SearchResult::new("https://example.com/b", "B", 3),
            ],
        );

        let finder = finder_with(fetcher, extractor, searcher);
        let report = finder.find_opportunities(source).await.unwrap();

        let targets = &report.suggestions[0].target_urls;
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].url, "https://example.com/a");
        assert_eq!(targets[1].url, "https://example.com/b");
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_targets_capped_at_configured_budget() {
        let source = "https://example.com/post";
        let results: Vec<SearchResult> = (1..=8)
            .map(|i| SearchResult::new(format!("https://example.com/p{i}"), format!("P{i}"), i))
            .collect();

        let fetcher = MockFetcher::new().with_page(page(source));
        let extractor = MockAnchorExtractor::new()
            .with_candidates(vec![AnchorCandidate::new("docs", 0.8, "")]);
        let searcher = MockSearcher::new().with_results("docs", results);

        let finder = finder_with(fetcher, extractor, searcher);
        let report = finder.find_opportunities(source).await.unwrap();

        let targets = &report.suggestions[0].target_urls;
        assert_eq!(targets.len(), 3);
        // Rank order preserved, budget filled from the top.
        assert_eq!(targets[0].url, "https://example.com/p1");
        assert_eq!(targets[2].url, "https://example.com/p3");
    }

    #[tokio::test]
    async fn test_keyword_failure_is_isolated() {
        let source = "https://example.com/post";
        let fetcher = MockFetcher::new().with_page(page(source));
        let extractor = MockAnchorExtractor::new().with_candidates(vec![
            AnchorCandidate::new("good", 0.9, ""),
            AnchorCandidate::new("bad", 0.8, ""),
            AnchorCandidate::new("also good", 0.7, ""),
        ]);
        let searcher = MockSearcher::new()
            .with_results("good", vec![SearchResult::new("https://example.com/g", "G", 1)])
            .with_error("bad", SearchError::Api("timeout".to_string()))
            .with_results(
                "also good",
                vec![SearchResult::new("https://example.com/ag", "AG", 1)],
            );

        let finder = finder_with(fetcher, extractor, searcher);
        let report = finder.find_opportunities(source).await.unwrap();

        // Every anchor still gets a suggestion entry.
        assert_eq!(report.suggestions.len(), 3);
        assert_eq!(report.suggestions[0].target_urls.len(), 1);
        assert!(report.suggestions[1].target_urls.is_empty());
        assert_eq!(report.suggestions[2].target_urls.len(), 1);

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("bad"));
    }

    #[tokio::test]
    async fn test_extraction_error_ends_run_successfully() {
        let source = "https://example.com/post";
        let fetcher = MockFetcher::new().with_page(page(source));
        let extractor = MockAnchorExtractor::new()
            .failing_with(crate::error::ExtractError::Api("quota exceeded".to_string()));
        let searcher = MockSearcher::new();

        let finder = finder_with(fetcher, extractor, searcher);
        let report = finder.find_opportunities(source).await.unwrap();

        assert!(report.suggestions.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("quota exceeded"));
        assert_eq!(finder.searcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_candidates_ends_run_successfully() {
        let source = "https://example.com/post";
        let fetcher = MockFetcher::new().with_page(page(source));
        let extractor = MockAnchorExtractor::new().with_candidates(vec![]);

        let finder = finder_with(fetcher, extractor, MockSearcher::new());
        let report = finder.find_opportunities(source).await.unwrap();

        assert!(report.suggestions.is_empty());
        assert_eq!(report.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_suggestions_capped_at_max_keywords() {
        let source = "https://example.com/post";
        let candidates: Vec<AnchorCandidate> = (0..15)
            .map(|i| AnchorCandidate::new(format!("kw{i}"), 0.5, ""))
            .collect();

        let fetcher = MockFetcher::new().with_page(page(source));
        let extractor = MockAnchorExtractor::new().with_candidates(candidates);
        let searcher = MockSearcher::new();

        let finder = finder_with(fetcher, extractor, searcher);
        let report = finder.find_opportunities(source).await.unwrap();

        assert_eq!(report.suggestions.len(), 10);
        assert_eq!(finder.searcher.call_count(), 10);
    }
}
