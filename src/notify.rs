//! Support notifications
//!
//! Side-effect only: the workflow hands a fixed-shape notification to a
//! sink and gets a delivery receipt back. Delivery is best-effort; the
//! incident record stays authoritative regardless of what happens here.

use crate::errors::Result;
use crate::records::IncidentDraft;
use async_trait::async_trait;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A structured notification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// The message sent to support when an incident is created: subject
    /// `New Incident <number>`, body = short description, blank line,
    /// full description.
    pub fn incident_created(support_address: &str, number: &str, draft: &IncidentDraft) -> Self {
        Notification {
            to: vec![support_address.to_string()],
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: format!("New Incident {}", number),
            body: format!("{}\n\n{}", draft.short_description, draft.description),
        }
    }
}

/// Delivery acknowledgment returned by a sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub status: String,
    pub message_id: String,
    #[serde(default)]
    pub note: String,
}

/// Accepts a notification and returns a delivery acknowledgment.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<EmailReceipt>;
}

/// Local mock mailer: never sends anything, prints what it would have sent
/// and acknowledges with a fresh `MOCK-<uuid>` message id.
pub struct MockMailer;

#[async_trait]
impl NotificationSink for MockMailer {
    async fn send(&self, notification: &Notification) -> Result<EmailReceipt> {
        let message_id = format!("MOCK-{}", Uuid::new_v4());

        println!("\n{}", "Mock email sent".bold().cyan());
        println!("{}", "-".repeat(60).cyan());
        println!("  {} {}", "To:".cyan(), notification.to.join(", "));
        println!("  {} {}", "Subject:".cyan(), notification.subject);
        println!("  {} {}", "Message ID:".cyan(), message_id);
        println!("{}", "-".repeat(60).cyan());

        Ok(EmailReceipt {
            status: "ok".to_string(),
            message_id,
            note: "Mock email only - no actual message sent.".to_string(),
        })
    }
}
