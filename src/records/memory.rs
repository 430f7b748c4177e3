//! In-process record store
//!
//! Backs local mode and tests. Matching and ordering follow the store
//! contract exactly: OR-substring filter on the short description, sorted
//! by recency descending with descending number as the tie-break, truncated
//! to the caller's limit. All access goes through one async mutex, so
//! conflicting inserts are serialized.

use crate::errors::{AssistantError, Result};
use crate::query::FilterTokens;
use crate::records::types::{Incident, IncidentState, KnowledgeArticle, Record};
use crate::records::RecordStore;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

/// Mutex-guarded vector store, generic over the record type.
pub struct MemoryStore<R: Record> {
    records: Mutex<Vec<R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        MemoryStore {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<R>) -> Self {
        MemoryStore {
            records: Mutex::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn search(&self, tokens: &FilterTokens, limit: usize) -> Result<Vec<R>> {
        let records = self.records.lock().await;

        let mut matches: Vec<R> = records
            .iter()
            .filter(|record| tokens.matches(record.short_description()))
            .cloned()
            .collect();

        // Most recent first; equal timestamps order by descending number so
        // the result is deterministic.
        matches.sort_by(|a, b| {
            b.recency()
                .cmp(&a.recency())
                .then_with(|| b.number().cmp(a.number()))
        });
        matches.truncate(limit);

        Ok(matches)
    }

    async fn insert(&self, record: R) -> Result<String> {
        let mut records = self.records.lock().await;

        if records.iter().any(|existing| existing.number() == record.number()) {
            return Err(AssistantError::DuplicateKey(record.number().to_string()));
        }

        let number = record.number().to_string();
        records.push(record);
        tracing::debug!(number = %number, "record inserted");
        Ok(number)
    }
}

/// Sample knowledge base for local mode.
pub fn demo_knowledge_base() -> MemoryStore<KnowledgeArticle> {
    let now = Utc::now();
    let article = |days_ago: i64, number: &str, short: &str, category: &str| KnowledgeArticle {
        number: number.to_string(),
        version: "1".to_string(),
        short_description: short.to_string(),
        author: "IT Support".to_string(),
        category: category.to_string(),
        workflow: "Published".to_string(),
        updated_at: now - Duration::days(days_ago),
    };

    MemoryStore::with_records(vec![
        article(2, "KB0010001", "VPN connection troubleshooting", "Network"),
        article(9, "KB0010002", "How to reset your email password", "Accounts"),
        article(15, "KB0010003", "Printer offline or not responding", "Hardware"),
        article(30, "KB0010004", "Requesting software installation", "Software"),
        article(45, "KB0010005", "Wi-Fi drops in meeting rooms", "Network"),
    ])
}

/// Sample incident history for local mode.
pub fn demo_incidents() -> MemoryStore<Incident> {
    let now = Utc::now();
    let incident = |days_ago: i64, number: &str, short: &str, state: IncidentState| Incident {
        number: number.to_string(),
        opened_at: now - Duration::days(days_ago),
        short_description: short.to_string(),
        description: short.to_string(),
        state,
        assigned_to: None,
        resolution_code: None,
        resolution_notes: None,
    };

    MemoryStore::with_records(vec![
        incident(1, "INC20250801090000", "VPN disconnects every hour", IncidentState::InProgress),
        incident(6, "INC20250727141500", "Cannot print from laptop", IncidentState::Closed),
        incident(12, "INC20250721103000", "Email sync stopped on phone", IncidentState::OnHold),
    ])
}
