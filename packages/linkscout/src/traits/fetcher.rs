//! Page fetcher trait.

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::types::PageContent;

/// Fetches a URL and reduces it to title, body text and headings.
///
/// A fetch failure is fatal to the run that requested it; there is no
/// partial page content.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page.
    async fn fetch(&self, url: &str) -> Result<PageContent, ScrapeError>;
}
