//! Data types for the link-suggestion pipeline.

pub mod page;
pub mod suggestion;

pub use page::PageContent;
pub use suggestion::{AnchorCandidate, FindReport, LinkSuggestion, SearchResult, TargetUrl};
