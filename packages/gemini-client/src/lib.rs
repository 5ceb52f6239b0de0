//! Pure Google Gemini REST API client.
//!
//! A minimal client for the Gemini `generateContent` endpoint. Prompt
//! construction and response interpretation belong to the caller; this
//! crate only performs the request and returns the generated text.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerationConfig};
//!
//! let client = GeminiClient::new("api-key")?.with_model("gemini-2.0-flash");
//! let text = client
//!     .generate("Summarize this page", &GenerationConfig::default())
//!     .await?;
//! ```

pub mod error;

pub use error::{GeminiError, Result};

use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Sampling parameters for one generation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_output_tokens: 1024,
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client. Fails immediately when the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GeminiError::Config("Gemini API key not set".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .map_err(|e| GeminiError::Network(e.to_string()))?,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Set the model (default: gemini-2.0-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (for test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for a single prompt and return the first candidate's text.
    pub async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: config.clone(),
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Gemini request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api(format!("HTTP {}: {}", status, body)));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let text: String = payload
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| GeminiError::Parse("no candidates in response".to_string()))?;

        Ok(text)
    }
}

// Request/Response types

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            GeminiClient::new(""),
            Err(GeminiError::Config(_))
        ));
    }

    #[test]
    fn test_builder() {
        let client = GeminiClient::new("key")
            .unwrap()
            .with_model("gemini-1.5-pro")
            .with_base_url("https://custom.api.com");

        assert_eq!(client.model(), "gemini-1.5-pro");
        assert_eq!(client.base_url, "https://custom.api.com");
    }

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_output_tokens, 1024);
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    }
}
