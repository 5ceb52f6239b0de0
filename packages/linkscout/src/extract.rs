//! Gemini-backed anchor-text extraction.
//!
//! Implements [`AnchorExtractor`] over the generic Gemini client: builds
//! the prompt, calls `generateContent`, and salvages the JSON array out
//! of whatever the model wrapped it in.

use async_trait::async_trait;
use gemini_client::{GeminiClient, GeminiError, GenerationConfig};
use regex::Regex;
use serde::Deserialize;

use crate::error::ExtractError;
use crate::traits::AnchorExtractor;
use crate::types::AnchorCandidate;

/// Page text beyond this many characters is not sent to the model.
const MAX_CONTENT_CHARS: usize = 15_000;

/// Anchor-text extractor backed by Gemini.
pub struct GeminiAnchorExtractor {
    client: GeminiClient,
    generation: GenerationConfig,
}

impl GeminiAnchorExtractor {
    /// Create an extractor over a configured client.
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            generation: GenerationConfig::default(),
        }
    }

    fn build_prompt(text: &str, title: &str, domain: &str, max_suggestions: usize) -> String {
        let content: String = text.chars().take(MAX_CONTENT_CHARS).collect();

        format!(
            "Analyze this page from {domain} (title: \"{title}\") and return exactly \
             {max_suggestions} anchor text candidates for internal linking. Pick terms that \
             likely have their own page on this domain.\n\n\
             Content:\n{content}\n\n\
             Return ONLY a JSON array:\n\
             [{{\"anchor_text\":\"term\",\"relevance_score\":0.8,\"reasoning\":\"why\"}}]"
        )
    }
}

#[async_trait]
impl AnchorExtractor for GeminiAnchorExtractor {
    async fn extract(
        &self,
        text: &str,
        title: &str,
        domain: &str,
        max_suggestions: usize,
    ) -> Result<Vec<AnchorCandidate>, ExtractError> {
        let prompt = Self::build_prompt(text, title, domain, max_suggestions);

        let response = self
            .client
            .generate(&prompt, &self.generation)
            .await
            .map_err(|e| match e {
                GeminiError::Config(msg) => ExtractError::Config(msg),
                GeminiError::Parse(msg) => ExtractError::Parse(msg),
                GeminiError::Network(msg) | GeminiError::Api(msg) => ExtractError::Api(msg),
            })?;

        let candidates = parse_candidates(&response, max_suggestions)?;
        tracing::debug!(count = candidates.len(), "anchor candidates parsed");
        Ok(candidates)
    }
}

/// Pull the first JSON array out of a model response and parse it.
///
/// Tolerates markdown code fences and prose around the array. Entries
/// with empty anchor text are dropped; a missing relevance score defaults
/// to 0.5.
fn parse_candidates(response: &str, max_suggestions: usize) -> Result<Vec<AnchorCandidate>, ExtractError> {
    #[derive(Deserialize)]
    struct RawCandidate {
        #[serde(default)]
        anchor_text: String,
        relevance_score: Option<f64>,
        #[serde(default)]
        reasoning: String,
    }

    let trimmed = response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let array_pattern = Regex::new(r"(?s)\[.*\]").unwrap();
    let json = array_pattern
        .find(trimmed)
        .map(|m| m.as_str())
        .ok_or_else(|| ExtractError::Parse("no JSON array in response".to_string()))?;

    let raw: Vec<RawCandidate> =
        serde_json::from_str(json).map_err(|e| ExtractError::Parse(e.to_string()))?;

    Ok(raw
        .into_iter()
        .filter_map(|item| {
            let text = item.anchor_text.trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(AnchorCandidate {
                text,
                relevance_score: item.relevance_score.unwrap_or(0.5),
                reasoning: item.reasoning,
            })
        })
        .take(max_suggestions)
        .collect())
}
