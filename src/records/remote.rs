//! Tool-service client and remote store adapters
//!
//! In a full deployment the stores and the mailer live behind a tool
//! service. Each operation is a JSON request/response over HTTP; transport
//! errors surface as `StoreUnavailable` (or `NotificationFailure` for the
//! mail operation) so the workflow can abort cleanly.

use crate::errors::{AssistantError, Result};
use crate::notify::{EmailReceipt, Notification, NotificationSink};
use crate::query::FilterTokens;
use crate::records::types::{Incident, IncidentState, KnowledgeArticle};
use crate::records::RecordStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the tool service.
pub struct ToolClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    short_description_contains: &'a str,
    limit: usize,
}

#[derive(Debug, Serialize)]
struct CreateIncidentRequest<'a> {
    number: &'a str,
    opened: DateTime<Utc>,
    short_description: &'a str,
    description: &'a str,
    state: IncidentState,
    assigned_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIncidentResponse {
    pub status: String,
    pub number: String,
}

impl ToolClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(ToolClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// One tool invocation: POST `{base}/tools/{name}` with a JSON body.
    async fn call<Req, Resp>(&self, tool: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/tools/{}", self.base_url, tool);
        tracing::debug!(tool, "calling tool service");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AssistantError::StoreUnavailable(e.to_string()))?;

        match response.status() {
            StatusCode::CONFLICT => {
                let detail = response.text().await.unwrap_or_default();
                Err(AssistantError::DuplicateKey(detail))
            }
            status if !status.is_success() => Err(AssistantError::StoreUnavailable(format!(
                "{} returned {}",
                tool, status
            ))),
            _ => Ok(response.json().await?),
        }
    }

    pub async fn search_knowledge_base(
        &self,
        contains: &str,
        limit: usize,
    ) -> Result<Vec<KnowledgeArticle>> {
        self.call(
            "search_knowledge_base",
            &SearchRequest {
                short_description_contains: contains,
                limit,
            },
        )
        .await
    }

    pub async fn search_incidents(&self, contains: &str, limit: usize) -> Result<Vec<Incident>> {
        self.call(
            "search_incidents",
            &SearchRequest {
                short_description_contains: contains,
                limit,
            },
        )
        .await
    }

    pub async fn create_incident(&self, incident: &Incident) -> Result<CreateIncidentResponse> {
        self.call(
            "create_incident",
            &CreateIncidentRequest {
                number: &incident.number,
                opened: incident.opened_at,
                short_description: &incident.short_description,
                description: &incident.description,
                state: incident.state,
                assigned_to: incident.assigned_to.as_deref(),
            },
        )
        .await
    }

    pub async fn email_send_mock(&self, notification: &Notification) -> Result<EmailReceipt> {
        self.call("email_send_mock", notification)
            .await
            .map_err(|e| AssistantError::NotificationFailure(e.to_string()))
    }

    /// Reachability probe for diagnostics.
    pub async fn is_available(&self) -> bool {
        self.client
            .get(&self.base_url)
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .is_ok()
    }
}

/// Knowledge-base store backed by the tool service. Read-only.
pub struct RemoteKnowledgeStore {
    client: Arc<ToolClient>,
}

impl RemoteKnowledgeStore {
    pub fn new(client: Arc<ToolClient>) -> Self {
        RemoteKnowledgeStore { client }
    }
}

#[async_trait]
impl RecordStore<KnowledgeArticle> for RemoteKnowledgeStore {
    async fn search(&self, tokens: &FilterTokens, limit: usize) -> Result<Vec<KnowledgeArticle>> {
        self.client
            .search_knowledge_base(&tokens.join(" "), limit)
            .await
    }

    async fn insert(&self, _record: KnowledgeArticle) -> Result<String> {
        Err(AssistantError::ReadOnlyStore)
    }
}

/// Incident store backed by the tool service.
pub struct RemoteIncidentStore {
    client: Arc<ToolClient>,
}

impl RemoteIncidentStore {
    pub fn new(client: Arc<ToolClient>) -> Self {
        RemoteIncidentStore { client }
    }
}

#[async_trait]
impl RecordStore<Incident> for RemoteIncidentStore {
    async fn search(&self, tokens: &FilterTokens, limit: usize) -> Result<Vec<Incident>> {
        self.client.search_incidents(&tokens.join(" "), limit).await
    }

    async fn insert(&self, record: Incident) -> Result<String> {
        let response = self.client.create_incident(&record).await?;
        Ok(response.number)
    }
}

/// Notification sink backed by the tool service's mock mailer.
pub struct RemoteNotifier {
    client: Arc<ToolClient>,
}

impl RemoteNotifier {
    pub fn new(client: Arc<ToolClient>) -> Self {
        RemoteNotifier { client }
    }
}

#[async_trait]
impl NotificationSink for RemoteNotifier {
    async fn send(&self, notification: &Notification) -> Result<EmailReceipt> {
        self.client.email_send_mock(notification).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ToolClient::new("http://127.0.0.1:8000");
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_service_maps_to_store_unavailable() {
        // Port 9 (discard) is not listening in test environments.
        let client = ToolClient::new("http://127.0.0.1:9").unwrap();
        let err = client.search_incidents("vpn", 5).await.unwrap_err();
        assert!(matches!(err, AssistantError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_remote_knowledge_store_rejects_insert() {
        let client = Arc::new(ToolClient::new("http://127.0.0.1:8000").unwrap());
        let store = RemoteKnowledgeStore::new(client);

        let article = KnowledgeArticle {
            number: "KB1".to_string(),
            version: "1".to_string(),
            short_description: "VPN".to_string(),
            author: "a".to_string(),
            category: "Network".to_string(),
            workflow: "Published".to_string(),
            updated_at: Utc::now(),
        };

        let err = store.insert(article).await.unwrap_err();
        assert!(matches!(err, AssistantError::ReadOnlyStore));
    }

    #[test]
    fn test_create_incident_request_uses_wire_field_names() {
        let request = CreateIncidentRequest {
            number: "INC20240101120000",
            opened: Utc::now(),
            short_description: "short",
            description: "long",
            state: IncidentState::New,
            assigned_to: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("opened").is_some());
        assert_eq!(json["state"], "New");
    }
}
