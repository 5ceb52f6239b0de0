use serde::{Deserialize, Serialize};

/// Status code DataForSEO uses for a successful call or task.
pub const STATUS_OK: u32 = 20000;

/// A single organic search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    /// 1-based absolute SERP rank; 0 when the API omits it.
    pub position: u32,
    pub snippet: String,
}

/// Parameters for one SERP task.
#[derive(Debug, Clone, Serialize)]
pub struct SerpQuery {
    pub keyword: String,
    pub location_code: u32,
    pub language_code: String,
    pub depth: u32,
    pub device: String,
}

impl SerpQuery {
    /// Create a query with DataForSEO's desktop device default.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            location_code: 2840,
            language_code: "en".to_string(),
            depth: 10,
            device: "desktop".to_string(),
        }
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

    /// Set the number of results to retrieve.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

/// Top-level SERP response payload.
#[derive(Debug, Deserialize)]
pub struct SerpResponse {
    pub status_code: u32,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub tasks: Vec<SerpTask>,
}

/// One task inside a SERP response.
#[derive(Debug, Deserialize)]
pub struct SerpTask {
    pub status_code: u32,
    #[serde(default)]
    pub result: Vec<TaskResult>,
}

/// The result block of a succeeded task.
#[derive(Debug, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub items: Vec<SerpItem>,
}

/// A single SERP item; only `type == "organic"` entries are kept.
#[derive(Debug, Deserialize)]
pub struct SerpItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub rank_absolute: u32,
    #[serde(default)]
    pub description: String,
}
