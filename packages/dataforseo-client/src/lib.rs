//! Pure DataForSEO REST API client.
//!
//! A minimal client for the DataForSEO SERP API. Supports live organic
//! Google searches and the account-status endpoint. Retry and rate-limit
//! discipline belong to the caller; this crate only performs single
//! requests and translates status codes into typed errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use dataforseo_client::{DataForSeoClient, SerpQuery};
//!
//! let client = DataForSeoClient::new("login", "password")?;
//!
//! let query = SerpQuery::new(r#"site:example.com "pricing""#).with_depth(10);
//! let results = client.search_serp(&query).await?;
//! for result in &results {
//!     println!("{} {}", result.position, result.url);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{DataForSeoError, Result};
pub use types::{SearchResult, SerpQuery};

use types::{SerpResponse, STATUS_OK};

const BASE_URL: &str = "https://api.dataforseo.com/v3";

pub struct DataForSeoClient {
    client: reqwest::Client,
    login: String,
    password: String,
    base_url: String,
}

impl DataForSeoClient {
    /// Create a new client. Fails immediately when either credential is empty.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let login = login.into();
        let password = password.into();
        if login.is_empty() || password.is_empty() {
            return Err(DataForSeoError::Credentials(
                "set DATAFORSEO_LOGIN and DATAFORSEO_PASSWORD".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            login,
            password,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Override the API base URL (for test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client (e.g. with a different timeout).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Run one live organic SERP task and return its organic results in rank order.
    pub async fn search_serp(&self, query: &SerpQuery) -> Result<Vec<SearchResult>> {
        let url = format!("{}/serp/google/organic/live/advanced", self.base_url);
        tracing::debug!(keyword = %query.keyword, depth = query.depth, "SERP request");

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.login, Some(&self.password))
            .json(&[query])
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 401 {
            return Err(DataForSeoError::Authentication);
        }
        if status.as_u16() == 429 {
            return Err(DataForSeoError::RateLimit);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DataForSeoError::Api(format!("HTTP {}: {}", status, body)));
        }

        let payload: SerpResponse = resp.json().await?;
        parse_response(payload)
    }

    /// Fetch the raw account info (balance, limits). Single GET, no retry.
    pub async fn user_data(&self) -> Result<serde_json::Value> {
        let url = format!("{}/appendix/user_data", self.base_url);

        let resp = self
            .client
            .get(&url)
            .basic_auth(&self.login, Some(&self.password))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DataForSeoError::Api(format!("HTTP {}: {}", status, body)));
        }

        Ok(resp.json().await?)
    }
}

/// Flatten a SERP payload into organic results.
///
/// A non-success top-level status is fatal for the call. A failed task is
/// skipped without error so the remaining tasks still contribute.
fn parse_response(payload: SerpResponse) -> Result<Vec<SearchResult>> {
    if payload.status_code != STATUS_OK {
        return Err(DataForSeoError::Api(
            payload
                .status_message
                .unwrap_or_else(|| format!("status code {}", payload.status_code)),
        ));
    }

    let mut results = Vec::new();

    for task in payload.tasks {
        if task.status_code != STATUS_OK {
            tracing::debug!(status = task.status_code, "skipping failed task");
            continue;
        }

        for result in task.result {
            for item in result.items {
                if item.item_type != "organic" {
                    continue;
                }
                results.push(SearchResult {
                    url: item.url,
                    title: item.title,
                    position: item.rank_absolute,
                    snippet: item.description,
                });
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<SearchResult>> {
        parse_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            DataForSeoClient::new("", "password"),
            Err(DataForSeoError::Credentials(_))
        ));
        assert!(matches!(
            DataForSeoClient::new("login", ""),
            Err(DataForSeoError::Credentials(_))
        ));
        assert!(DataForSeoClient::new("login", "password").is_ok());
    }

    #[test]
    fn test_parse_keeps_only_organic_items() {
        let results = parse(
            r#"{
                "status_code": 20000,
                "tasks": [{
                    "status_code": 20000,
                    "result": [{
                        "items": [
                            {"type": "paid", "url": "https://ads.example.com", "title": "Ad", "rank_absolute": 1, "description": ""},
                            {"type": "organic", "url": "https://example.com/a", "title": "A", "rank_absolute": 2, "description": "First"},
                            {"type": "featured_snippet", "url": "https://example.com/s", "title": "S", "rank_absolute": 3, "description": ""},
                            {"type": "organic", "url": "https://example.com/b", "title": "B", "rank_absolute": 4, "description": "Second"}
                        ]
                    }]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://example.com/a");
        assert_eq!(results[0].position, 2);
        assert_eq!(results[1].snippet, "Second");
    }

    #[test]
    fn test_parse_skips_failed_task_without_error() {
        let results = parse(
            r#"{
                "status_code": 20000,
                "tasks": [
                    {"status_code": 40501, "result": []},
                    {"status_code": 20000, "result": [{
                        "items": [{"type": "organic", "url": "https://example.com/ok", "title": "OK", "rank_absolute": 1, "description": ""}]
                    }]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://example.com/ok");
    }

    #[test]
    fn test_parse_top_level_error_is_fatal() {
        let err = parse(r#"{"status_code": 40100, "status_message": "payment required", "tasks": []}"#)
            .unwrap_err();

        match err {
            DataForSeoError::Api(msg) => assert!(msg.contains("payment required")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults_missing_rank_to_zero() {
        let results = parse(
            r#"{
                "status_code": 20000,
                "tasks": [{
                    "status_code": 20000,
                    "result": [{"items": [{"type": "organic", "url": "https://example.com", "title": "T"}]}]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(results[0].position, 0);
        assert_eq!(results[0].snippet, "");
    }

    #[test]
    fn test_serp_query_builder() {
        let query = SerpQuery::new("site:example.com \"pricing\"")
            .with_depth(20)
            .with_location_code(2826)
            .with_language_code("de");

        assert_eq!(query.depth, 20);
        assert_eq!(query.location_code, 2826);
        assert_eq!(query.language_code, "de");
        assert_eq!(query.device, "desktop");
    }
}
