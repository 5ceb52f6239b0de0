//! Anchor candidates, search results and the assembled report.

use serde::{Deserialize, Serialize};

/// An anchor-text candidate proposed by the model.
///
/// At most `FinderConfig::max_keywords` per page; the extractor's order is
/// treated as relevance-descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorCandidate {
    /// The clickable text to link from.
    pub text: String,

    /// Model-assigned relevance in 0.0..=1.0.
    pub relevance_score: f64,

    /// Why the model picked this phrase.
    pub reasoning: String,
}

impl AnchorCandidate {
    /// Create a candidate.
    pub fn new(text: impl Into<String>, relevance_score: f64, reasoning: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            relevance_score,
            reasoning: reasoning.into(),
        }
    }
}

/// One search hit for a keyword, in SERP rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    /// 1-based absolute SERP rank; 0 when the API omits it.
    pub position: u32,
    pub snippet: String,
}

impl SearchResult {
    /// Create a search result with an empty snippet.
    pub fn new(url: impl Into<String>, title: impl Into<String>, position: u32) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            position,
            snippet: String::new(),
        }
    }

    /// Set the snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }
}

/// A target page confirmed for an anchor text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetUrl {
    pub url: String,
    pub title: String,
    pub position: u32,
}

impl From<SearchResult> for TargetUrl {
    fn from(result: SearchResult) -> Self {
        Self {
            url: result.url,
            title: result.title,
            position: result.position,
        }
    }
}

/// A suggested internal link with up to `max_target_urls` target options.
///
/// Invariant: `target_urls` never contains the (normalized) source URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSuggestion {
    pub anchor_text: String,
    pub relevance_score: f64,
    pub reasoning: String,
    pub target_urls: Vec<TargetUrl>,
}

impl LinkSuggestion {
    /// Start a suggestion for a candidate, with no targets yet.
    pub fn for_candidate(candidate: AnchorCandidate) -> Self {
        Self {
            anchor_text: candidate.text,
            relevance_score: candidate.relevance_score,
            reasoning: candidate.reasoning,
            target_urls: Vec::new(),
        }
    }
}

/// The terminal artifact of one finder run.
///
/// `suggestions` is in anchor-processing order; `errors` is append-only,
/// one entry per extraction-level or keyword-level failure. Both are
/// handed as-is to formatters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindReport {
    /// The analyzed source URL.
    pub source_url: String,

    /// One entry per anchor processed, even when no targets were found.
    pub suggestions: Vec<LinkSuggestion>,

    /// Human-readable, non-fatal failures collected during the run.
    pub errors: Vec<String>,
}

impl FindReport {
    /// Create an empty report for a source URL.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            suggestions: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Total target URLs across all suggestions.
    pub fn target_count(&self) -> usize {
        self.suggestions.iter().map(|s| s.target_urls.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_for_candidate_carries_fields() {
        let candidate = AnchorCandidate::new("rust crates", 0.9, "likely has its own page");
        let suggestion = LinkSuggestion::for_candidate(candidate);

        assert_eq!(suggestion.anchor_text, "rust crates");
        assert!((suggestion.relevance_score - 0.9).abs() < f64::EPSILON);
        assert!(suggestion.target_urls.is_empty());
    }

    #[test]
    fn test_target_from_search_result_drops_snippet() {
        let result = SearchResult::new("https://example.com/a", "A", 2).with_snippet("snippet");
        let target = TargetUrl::from(result);

        assert_eq!(target.url, "https://example.com/a");
        assert_eq!(target.position, 2);
    }

    #[test]
    fn test_report_target_count() {
        let mut report = FindReport::new("https://example.com");
        let mut suggestion =
            LinkSuggestion::for_candidate(AnchorCandidate::new("a", 0.5, ""));
        suggestion
            .target_urls
            .push(TargetUrl::from(SearchResult::new("https://example.com/x", "X", 1)));
        report.suggestions.push(suggestion);

        assert_eq!(report.target_count(), 1);
    }
}
