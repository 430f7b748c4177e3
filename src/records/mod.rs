//! Record stores for knowledge articles and incidents
//!
//! Two instances of the same abstraction back the workflow: a knowledge
//! base (read-only) and an incident history (searched and appended). The
//! store is a shared resource across runs; implementations serialize
//! inserts so a generated number can never be written twice.

pub mod memory;
pub mod remote;
pub mod types;

pub use memory::MemoryStore;
pub use remote::{RemoteIncidentStore, RemoteKnowledgeStore, ToolClient};
pub use types::{Incident, IncidentDraft, IncidentState, KnowledgeArticle, Record};

use crate::errors::Result;
use crate::query::FilterTokens;
use async_trait::async_trait;

/// Token-filtered, recency-ordered lookup plus atomic insert.
///
/// `search` surfaces a record if any token is a case-insensitive substring
/// of its short description; an empty token set matches everything. Results
/// are most-recent-first, truncated to `limit` (callers pass `limit >= 1`).
/// `insert` either fully applies or fails; no partial write is observable.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    async fn search(&self, tokens: &FilterTokens, limit: usize) -> Result<Vec<R>>;

    async fn insert(&self, record: R) -> Result<String>;
}
