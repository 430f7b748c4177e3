//! Typed records crossing the store boundary
//!
//! Knowledge articles and incidents arrive as loose JSON from the tool
//! service; they are converted into these structs on receipt and stay
//! typed through the workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A published troubleshooting or reference entry. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    pub number: String,
    pub version: String,
    pub short_description: String,
    pub author: String,
    pub category: String,
    pub workflow: String,
    #[serde(alias = "updated")]
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle state of an incident, with the wire spellings used by the
/// incident database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncidentState {
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    Closed,
}

impl fmt::Display for IncidentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IncidentState::New => "New",
            IncidentState::InProgress => "In Progress",
            IncidentState::OnHold => "On Hold",
            IncidentState::Closed => "Closed",
        };
        write!(f, "{}", label)
    }
}

/// A tracked record of an unresolved user-reported problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub number: String,
    #[serde(alias = "opened")]
    pub opened_at: DateTime<Utc>,
    pub short_description: String,
    pub description: String,
    pub state: IncidentState,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub resolution_code: Option<String>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

/// User-supplied incident details, collected before a number and clock
/// read are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentDraft {
    pub short_description: String,
    pub description: String,
    pub assigned_to: Option<String>,
}

impl Incident {
    /// Incident number for a creation instant: `INC` + 14 timestamp digits.
    pub fn number_for(opened_at: DateTime<Utc>) -> String {
        format!("INC{}", opened_at.format("%Y%m%d%H%M%S"))
    }

    /// Number with a random 3-digit disambiguator, used when the plain
    /// timestamp number collided with an existing record.
    pub fn disambiguated_number(opened_at: DateTime<Utc>, salt: u16) -> String {
        format!("{}{:03}", Self::number_for(opened_at), salt % 1000)
    }

    /// Build a new incident from user-collected details. The caller reads
    /// the clock once; `opened_at` and the number must not skew.
    pub fn from_draft(draft: IncidentDraft, number: String, opened_at: DateTime<Utc>) -> Self {
        Incident {
            number,
            opened_at,
            short_description: draft.short_description,
            description: draft.description,
            state: IncidentState::New,
            assigned_to: draft.assigned_to,
            resolution_code: None,
            resolution_notes: None,
        }
    }
}

/// Common view over the two record types so one store implementation can
/// serve both.
pub trait Record: Clone + Send + Sync + 'static {
    fn number(&self) -> &str;
    fn short_description(&self) -> &str;
    /// Recency used for result ordering: `updated_at` for knowledge
    /// articles, `opened_at` for incidents.
    fn recency(&self) -> DateTime<Utc>;
}

impl Record for KnowledgeArticle {
    fn number(&self) -> &str {
        &self.number
    }

    fn short_description(&self) -> &str {
        &self.short_description
    }

    fn recency(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Record for Incident {
    fn number(&self) -> &str {
        &self.number
    }

    fn short_description(&self) -> &str {
        &self.short_description
    }

    fn recency(&self) -> DateTime<Utc> {
        self.opened_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_incident_number_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let number = Incident::number_for(at);
        assert_eq!(number, "INC20240101120000");
        assert_eq!(number.len(), 17);
        assert!(number[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_disambiguated_number_appends_three_digits() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            Incident::disambiguated_number(at, 7),
            "INC20240101120000007"
        );
        assert_eq!(
            Incident::disambiguated_number(at, 1234),
            "INC20240101120000234"
        );
    }

    #[test]
    fn test_from_draft_opens_as_new() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap();
        let draft = IncidentDraft {
            short_description: "VPN down".to_string(),
            description: "Cannot reach internal network".to_string(),
            assigned_to: None,
        };
        let incident = Incident::from_draft(draft, Incident::number_for(at), at);

        assert_eq!(incident.state, IncidentState::New);
        assert_eq!(incident.opened_at, at);
        assert_eq!(incident.number, "INC20240305083000");
        assert!(incident.resolution_code.is_none());
    }

    #[test]
    fn test_incident_state_wire_spelling() {
        let json = serde_json::to_string(&IncidentState::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let back: IncidentState = serde_json::from_str("\"On Hold\"").unwrap();
        assert_eq!(back, IncidentState::OnHold);
    }

    #[test]
    fn test_incident_accepts_opened_alias() {
        let json = r#"{
            "number": "INC20240101120000",
            "opened": "2024-01-01T12:00:00Z",
            "short_description": "VPN down",
            "description": "details",
            "state": "New"
        }"#;
        let incident: Incident = serde_json::from_str(json).unwrap();
        assert_eq!(incident.number, "INC20240101120000");
        assert!(incident.assigned_to.is_none());
    }
}
