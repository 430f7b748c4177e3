//! Workflow engine: Resolve → Confirm → Escalate
//!
//! Drives one run to completion against injected collaborators. Each run
//! owns its state exclusively; nothing is shared between runs except the
//! stores themselves.

use crate::errors::{AssistantError, Result};
use crate::interact::UserInteraction;
use crate::notify::{Notification, NotificationSink};
use crate::query::FilterTokens;
use crate::records::{Incident, IncidentDraft, KnowledgeArticle, RecordStore};
use crate::summarize::Summarizer;
use crate::workflow::state::RunPhase;
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;

/// How many records each store contributes to a run.
const SEARCH_LIMIT: usize = 5;

/// Attempts at generating a unique incident number before failing loudly.
const CREATE_ATTEMPTS: usize = 3;

/// Mutable state threaded through the phases of one run.
#[derive(Debug, Clone, Default)]
pub struct WorkflowRunState {
    pub user_query: String,
    pub kb_results: Vec<KnowledgeArticle>,
    pub incident_results: Vec<Incident>,
    pub user_feedback: Option<bool>,
    pub user_create_incident: Option<bool>,
    pub incident_number: Option<String>,
    pub final_response: Option<String>,
}

impl WorkflowRunState {
    pub fn new(user_query: impl Into<String>) -> Self {
        WorkflowRunState {
            user_query: user_query.into(),
            ..Default::default()
        }
    }
}

/// Orchestrates retrieval, summarization, confirmation, and escalation.
pub struct WorkflowEngine {
    knowledge: Arc<dyn RecordStore<KnowledgeArticle>>,
    incidents: Arc<dyn RecordStore<Incident>>,
    summarizer: Arc<dyn Summarizer>,
    notifier: Arc<dyn NotificationSink>,
    support_address: String,
}

impl WorkflowEngine {
    pub fn new(
        knowledge: Arc<dyn RecordStore<KnowledgeArticle>>,
        incidents: Arc<dyn RecordStore<Incident>>,
        summarizer: Arc<dyn Summarizer>,
        notifier: Arc<dyn NotificationSink>,
        support_address: impl Into<String>,
    ) -> Self {
        WorkflowEngine {
            knowledge,
            incidents,
            summarizer,
            notifier,
            support_address: support_address.into(),
        }
    }

    /// Drive one run from Resolve to Done.
    ///
    /// Failures in Resolve or Escalate propagate to the caller; the run
    /// produces no final response in that case and no partial escalation
    /// has happened.
    pub async fn run(
        &self,
        query: &str,
        ui: &mut dyn UserInteraction,
    ) -> Result<WorkflowRunState> {
        let mut run = WorkflowRunState::new(query);
        let mut phase = RunPhase::Resolve;

        while !phase.is_terminal() {
            tracing::debug!(phase = phase.display_name(), "entering phase");
            match phase {
                RunPhase::Resolve => self.resolve(&mut run, ui).await?,
                RunPhase::Confirm => self.confirm(&mut run, ui)?,
                RunPhase::Escalate => self.escalate(&mut run, ui).await?,
                RunPhase::Done => break,
            }
            phase = phase.advance();
        }

        Ok(run)
    }

    /// Search both stores, join, then summarize. Either search failing or
    /// the summarizer failing aborts the run before Confirm.
    async fn resolve(&self, run: &mut WorkflowRunState, ui: &mut dyn UserInteraction) -> Result<()> {
        let tokens = FilterTokens::parse(&run.user_query);
        tracing::debug!(tokens = %tokens, "searching stores");
        ui.show_searching();

        let (kb_results, incident_results) = tokio::try_join!(
            self.knowledge.search(&tokens, SEARCH_LIMIT),
            self.incidents.search(&tokens, SEARCH_LIMIT),
        )?;

        ui.show_matches(&kb_results, &incident_results);

        let summary = self
            .summarizer
            .summarize(&run.user_query, &kb_results, &incident_results)
            .await?;
        ui.show_suggestion(&summary);

        run.kb_results = kb_results;
        run.incident_results = incident_results;
        run.final_response = Some(summary);
        Ok(())
    }

    /// Block for the resolution decision, then conditionally for the
    /// incident-creation decision.
    fn confirm(&self, run: &mut WorkflowRunState, ui: &mut dyn UserInteraction) -> Result<()> {
        let resolved = ui.confirm_resolved()?;
        run.user_feedback = Some(resolved);

        run.user_create_incident = Some(if resolved {
            false
        } else {
            ui.confirm_create_incident()?
        });
        Ok(())
    }

    /// Select one of three outcomes from the confirmed decisions. An
    /// absent decision counts as "no": an incident is never created
    /// without an explicit yes.
    async fn escalate(&self, run: &mut WorkflowRunState, ui: &mut dyn UserInteraction) -> Result<()> {
        let feedback = run.user_feedback.unwrap_or(false);
        let create = run.user_create_incident.unwrap_or(false);

        match (feedback, create) {
            (false, true) => {
                let draft = ui.collect_incident_details()?;
                let number = self.create_incident(&draft).await?;

                let notification =
                    Notification::incident_created(&self.support_address, &number, &draft);
                let response = match self.notifier.send(&notification).await {
                    Ok(receipt) => {
                        tracing::info!(number = %number, message_id = %receipt.message_id, "incident created, support notified");
                        format!("Incident {} created.", number)
                    }
                    Err(err) => {
                        // The record exists; delivery is best-effort.
                        tracing::warn!(number = %number, error = %err, "incident created but notification failed");
                        format!("Incident {} created, but support was not notified.", number)
                    }
                };

                run.incident_number = Some(number);
                run.final_response = Some(response);
            }
            (false, false) => {
                run.final_response =
                    Some("No incident created. Issue remains unresolved.".to_string());
            }
            (true, _) => {
                run.final_response = Some("Glad it helped! No escalation needed.".to_string());
            }
        }
        Ok(())
    }

    /// Insert a new incident. The number and `opened_at` come from one
    /// clock read. A duplicate number is never re-submitted: each retry
    /// regenerates from a fresh clock read plus a random disambiguator.
    async fn create_incident(&self, draft: &IncidentDraft) -> Result<String> {
        let mut last_collision = String::new();

        for attempt in 0..CREATE_ATTEMPTS {
            let opened_at = Utc::now();
            let number = if attempt == 0 {
                Incident::number_for(opened_at)
            } else {
                Incident::disambiguated_number(opened_at, rand::thread_rng().gen_range(0..1000))
            };

            let incident = Incident::from_draft(draft.clone(), number.clone(), opened_at);
            match self.incidents.insert(incident).await {
                Ok(stored) => return Ok(stored),
                Err(AssistantError::DuplicateKey(_)) => {
                    tracing::warn!(number = %number, attempt, "incident number collision");
                    last_collision = number;
                }
                Err(err) => return Err(err),
            }
        }

        Err(AssistantError::DuplicateKey(last_collision))
    }
}
