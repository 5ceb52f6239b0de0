//! Scraped page content.

use serde::{Deserialize, Serialize};

/// Everything the pipeline keeps from the source page.
///
/// Produced once per run by the page fetcher. `domain` is the root domain
/// (subdomains stripped) and scopes every subsequent search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// The fetched URL, as requested.
    pub url: String,

    /// Root domain of `url`.
    pub domain: String,

    /// Page title (`<title>`, falling back to the first `<h1>`).
    pub title: String,

    /// Cleaned body text.
    pub text: String,

    /// Heading texts in document order.
    pub headings: Vec<String>,
}

impl PageContent {
    /// Create page content with empty title, text and headings.
    pub fn new(url: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            domain: domain.into(),
            title: String::new(),
            text: String::new(),
            headings: Vec::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the body text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the headings.
    pub fn with_headings(mut self, headings: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.headings = headings.into_iter().map(|h| h.into()).collect();
        self
    }
}
