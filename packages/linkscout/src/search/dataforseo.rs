//! DataForSEO-backed site searcher.

use async_trait::async_trait;
use dataforseo_client::{DataForSeoClient, SerpQuery};

use crate::config::FinderConfig;
use crate::error::SearchError;
use crate::traits::SiteSearcher;
use crate::types::SearchResult;

/// [`SiteSearcher`] over the DataForSEO SERP API.
///
/// Builds one `site:<domain> "<keyword>"` query per call. Depth, location
/// and language are resolved once at construction.
pub struct DataForSeoSearcher {
    client: DataForSeoClient,
    depth: u32,
    location_code: u32,
    language_code: String,
}

impl DataForSeoSearcher {
    /// Create a searcher with the default depth/location/language.
    pub fn new(client: DataForSeoClient) -> Self {
        let defaults = FinderConfig::default();
        Self {
            client,
            depth: defaults.search_depth,
            location_code: defaults.location_code,
            language_code: defaults.language_code,
        }
    }

    /// Create a searcher whose query parameters come from a finder config.
    pub fn from_config(client: DataForSeoClient, config: &FinderConfig) -> Self {
        Self {
            client,
            depth: config.search_depth,
            location_code: config.location_code,
            language_code: config.language_code.clone(),
        }
    }

    /// Set the SERP depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the Google location code.
    pub fn with_location_code(mut self, code: u32) -> Self {
        self.location_code = code;
        self
    }

    /// Set the language code.
    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = code.into();
        self
    }
}

#[async_trait]
impl SiteSearcher for DataForSeoSearcher {
    async fn search_site(
        &self,
        domain: &str,
        keyword: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let query = SerpQuery::new(format!("site:{domain} \"{keyword}\""))
            .with_depth(self.depth)
            .with_location_code(self.location_code)
            .with_language_code(self.language_code.clone());

        let results = self.client.search_serp(&query).await?;

        Ok(results
            .into_iter()
            .map(|r| SearchResult {
                url: r.url,
                title: r.title,
                position: r.position,
                snippet: r.snippet,
            })
            .collect())
    }
}
