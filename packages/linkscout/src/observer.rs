//! Progress observation hooks.
//!
//! The orchestrator announces stage boundaries and per-keyword progress
//! through an injected observer. These are side-channel notifications
//! only: they never participate in control flow or error handling, and a
//! run without an observer behaves identically.

/// Pipeline stage, announced at each boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetching the source page.
    Scraping,
    /// Asking the model for anchor-text candidates.
    Analyzing,
    /// Searching target pages per keyword.
    Searching,
    /// Run finished; the report is about to be returned.
    Complete,
}

impl Stage {
    /// Human-readable status message for this stage.
    pub fn message(&self) -> &'static str {
        match self {
            Stage::Scraping => "Scraping page content...",
            Stage::Analyzing => "Analyzing content with Gemini...",
            Stage::Searching => "Searching for target pages...",
            Stage::Complete => "Analysis complete",
        }
    }
}

/// Observer for finder progress. All methods default to no-ops.
pub trait FinderObserver: Send + Sync {
    /// Called at each stage boundary.
    fn on_status(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called once per anchor before its search; `current` is 1-based.
    fn on_keyword(&self, current: usize, total: usize, anchor_text: &str) {
        let _ = (current, total, anchor_text);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FinderObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_messages() {
        assert!(Stage::Scraping.message().contains("Scraping"));
        assert!(Stage::Complete.message().contains("complete"));
    }
}
