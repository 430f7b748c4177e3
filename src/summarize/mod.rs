//! Summarization boundary
//!
//! Given the user's query and the retrieved records, an external language
//! model produces free-text guidance. The returned text is opaque prose;
//! the core never parses it. Single attempt, no retry: if the call fails,
//! the run aborts.

pub mod ollama;
pub mod prompt;

pub use ollama::OllamaSummarizer;

use crate::errors::Result;
use crate::records::{Incident, KnowledgeArticle};
use async_trait::async_trait;

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        query: &str,
        kb_matches: &[KnowledgeArticle],
        incident_matches: &[Incident],
    ) -> Result<String>;
}
