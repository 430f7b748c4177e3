//! Ollama-backed summarizer
//!
//! Low-level HTTP client for the Ollama generate endpoint. Any failure to
//! reach the model maps to `SummarizationUnavailable` so the workflow can
//! abort the run instead of showing raw results without guidance.

use crate::errors::{AssistantError, Result};
use crate::records::{Incident, KnowledgeArticle};
use crate::summarize::{prompt, Summarizer};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// HTTP client for Ollama's generate API
pub struct OllamaSummarizer {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaSummarizer {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(OllamaSummarizer {
            client,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Single non-streaming generate call.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
            }))
            .send()
            .await
            .map_err(|e| AssistantError::SummarizationUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssistantError::SummarizationUnavailable(format!(
                "Ollama returned {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::SummarizationUnavailable(e.to_string()))?;

        Ok(body.response.trim().to_string())
    }

    /// List installed model names, for diagnostics.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AssistantError::SummarizationUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssistantError::SummarizationUnavailable(format!(
                "Ollama returned {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::SummarizationUnavailable(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Check if the Ollama server is reachable.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        self.client
            .get(&url)
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .is_ok()
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(
        &self,
        query: &str,
        kb_matches: &[KnowledgeArticle],
        incident_matches: &[Incident],
    ) -> Result<String> {
        let prompt = prompt::build_prompt(query, kb_matches, incident_matches);
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "requesting summary");
        self.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarizer_creation() {
        let summarizer = OllamaSummarizer::new("http://127.0.0.1:11434", "qwen2.5:7b-instruct");
        assert!(summarizer.is_ok());
        assert_eq!(summarizer.unwrap().model(), "qwen2.5:7b-instruct");
    }

    #[tokio::test]
    async fn test_unreachable_server_maps_to_summarization_unavailable() {
        let summarizer = OllamaSummarizer::new("http://127.0.0.1:9", "any-model").unwrap();
        let err = summarizer.summarize("vpn down", &[], &[]).await.unwrap_err();
        assert!(matches!(err, AssistantError::SummarizationUnavailable(_)));
    }

    #[tokio::test]
    #[ignore] // Requires Ollama running
    async fn test_is_available_integration() {
        let summarizer = OllamaSummarizer::new("http://127.0.0.1:11434", "any-model").unwrap();
        assert!(summarizer.is_available().await);
    }
}
