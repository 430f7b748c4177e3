//! Fixed prompt template for the suggested-fix summary

use crate::records::{Incident, KnowledgeArticle};

/// Build the reasoning prompt: restate the issue, list the retrieved
/// records verbatim as JSON, and instruct the model to surface topically
/// related entries and concrete next steps.
pub fn build_prompt(query: &str, kb: &[KnowledgeArticle], incidents: &[Incident]) -> String {
    let kb_json = serde_json::to_string_pretty(kb).unwrap_or_else(|_| "[]".to_string());
    let incident_json =
        serde_json::to_string_pretty(incidents).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"User issue: "{query}"

Related knowledge base entries:
{kb_json}

Related incidents:
{incident_json}

- Include KB numbers that mention the topic even if not exact matches.
- Suggest clear next steps or escalation guidance."#
    )
}
