//! Human-facing suspension points of a workflow run
//!
//! The engine blocks on these calls; the console implementation lives in
//! the `repl` module and tests substitute a scripted double. Prompt
//! defaults: resolution confirmation defaults to no, incident creation
//! defaults to yes.

use crate::errors::Result;
use crate::records::{Incident, IncidentDraft, KnowledgeArticle};

pub trait UserInteraction {
    /// Prompt for the next issue description. `None` means end of input.
    fn ask_query(&mut self) -> Result<Option<String>>;

    /// Notify that retrieval is underway. Purely informational.
    fn show_searching(&mut self) {}

    /// Present the retrieved knowledge articles and incidents.
    fn show_matches(&mut self, kb: &[KnowledgeArticle], incidents: &[Incident]);

    /// Present the suggested fix.
    fn show_suggestion(&mut self, text: &str);

    /// "Did this solution resolve your issue?" Defaults to no.
    fn confirm_resolved(&mut self) -> Result<bool>;

    /// "Would you like to create an incident?" Defaults to yes.
    fn confirm_create_incident(&mut self) -> Result<bool>;

    /// Collect short description, detailed description, and an optional
    /// assignee for a new incident.
    fn collect_incident_details(&mut self) -> Result<IncidentDraft>;

    /// Present the run's final response.
    fn show_final(&mut self, text: &str);

    /// Present a run failure. The session continues afterwards.
    fn show_error(&mut self, message: &str);
}
