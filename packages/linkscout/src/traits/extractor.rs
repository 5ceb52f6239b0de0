//! Anchor-text extractor trait.

use async_trait::async_trait;

use crate::error::ExtractError;
use crate::types::AnchorCandidate;

/// Proposes anchor-text candidates for a page.
///
/// Implementations return at most `max_suggestions` candidates in
/// relevance-descending order. The orchestrator treats a failure here as
/// reportable, not fatal: the run still completes with an empty
/// suggestion list and one explanatory error.
#[async_trait]
pub trait AnchorExtractor: Send + Sync {
    /// Extract candidates from page text.
    async fn extract(
        &self,
        text: &str,
        title: &str,
        domain: &str,
        max_suggestions: usize,
    ) -> Result<Vec<AnchorCandidate>, ExtractError>;
}
