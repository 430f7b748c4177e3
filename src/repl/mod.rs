//! Interactive session: console interaction and the outer loop
//!
//! The loop holds no state across iterations besides the exit decision.
//! Each iteration drives one workflow run to completion and presents the
//! final response; a failed run is reported and the session continues.

pub mod display;
pub mod input;

pub use display::ConsoleDisplay;
pub use input::InputHandler;

use crate::errors::{AssistantError, Result};
use crate::interact::UserInteraction;
use crate::records::{Incident, IncidentDraft, KnowledgeArticle};
use crate::workflow::WorkflowEngine;
use std::path::PathBuf;

const QUERY_PROMPT: &str = "Describe your IT issue: ";

/// Exit keywords accepted at the query prompt, case-insensitive.
pub fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Console implementation of the interactive boundary.
pub struct ConsoleInteraction {
    input: InputHandler,
    display: ConsoleDisplay,
}

impl ConsoleInteraction {
    pub fn new() -> Result<Self> {
        Ok(ConsoleInteraction {
            input: InputHandler::new()?,
            display: ConsoleDisplay::new(),
        })
    }

    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        Ok(ConsoleInteraction {
            input: InputHandler::with_history(history_file)?,
            display: ConsoleDisplay::new(),
        })
    }

    pub fn show_banner(&self, version: &str, model: &str) {
        self.display.show_banner(version, model);
    }

    /// Save input history. Called on graceful shutdown.
    pub fn save(&mut self) -> Result<()> {
        self.input.save_history()
    }

    /// Yes/no prompt; empty input or EOF takes the default.
    fn ask_yes_no(&mut self, question: &str, default_yes: bool) -> Result<bool> {
        let default_label = if default_yes { "yes" } else { "no" };
        let prompt = format!("{} [yes/no] ({}): ", question, default_label);

        loop {
            match self.input.read_line(&prompt)? {
                None => return Ok(default_yes),
                Some(answer) => match answer.to_lowercase().as_str() {
                    "" => return Ok(default_yes),
                    "y" | "yes" => return Ok(true),
                    "n" | "no" => return Ok(false),
                    _ => self.display.show_info("Please answer yes or no."),
                },
            }
        }
    }

    /// Free-text prompt that must not be empty.
    fn ask_required(&mut self, prompt: &str) -> Result<String> {
        loop {
            match self.input.read_line(prompt)? {
                None => {
                    return Err(AssistantError::Generic(
                        "input ended before incident details were provided".to_string(),
                    ))
                }
                Some(answer) if answer.is_empty() => {
                    self.display.show_info("A value is required.");
                }
                Some(answer) => return Ok(answer),
            }
        }
    }
}

impl UserInteraction for ConsoleInteraction {
    fn ask_query(&mut self) -> Result<Option<String>> {
        self.input.read_line(QUERY_PROMPT)
    }

    fn show_searching(&mut self) {
        self.display.start_searching();
    }

    fn show_matches(&mut self, kb: &[KnowledgeArticle], incidents: &[Incident]) {
        self.display.finish_searching();
        self.display.show_kb_table(kb);
        self.display.show_incident_table(incidents);
        self.display.start_searching();
    }

    fn show_suggestion(&mut self, text: &str) {
        self.display.finish_searching();
        self.display.show_suggestion(text);
    }

    fn confirm_resolved(&mut self) -> Result<bool> {
        self.ask_yes_no("Did this solution resolve your issue?", false)
    }

    fn confirm_create_incident(&mut self) -> Result<bool> {
        self.ask_yes_no("Would you like to create an incident?", true)
    }

    fn collect_incident_details(&mut self) -> Result<IncidentDraft> {
        self.display.show_info("Please provide incident details below.");

        let short_description = self.ask_required("Short description of the issue: ")?;
        let description = self.ask_required("Detailed description of what happened: ")?;
        let assigned_to = match self.input.read_line("Assign to (optional): ")? {
            None => None,
            Some(answer) if answer.is_empty() => None,
            Some(answer) => Some(answer),
        };

        Ok(IncidentDraft {
            short_description,
            description,
            assigned_to,
        })
    }

    fn show_final(&mut self, text: &str) {
        self.display.show_final(text);
    }

    fn show_error(&mut self, message: &str) {
        self.display.finish_searching();
        self.display.show_error(message);
    }
}

/// Repeatedly collects a query, drives one workflow run, and presents the
/// result.
pub struct InteractionLoop {
    engine: WorkflowEngine,
}

impl InteractionLoop {
    pub fn new(engine: WorkflowEngine) -> Self {
        InteractionLoop { engine }
    }

    pub async fn run(&self, ui: &mut dyn UserInteraction) -> Result<()> {
        loop {
            let query = match ui.ask_query() {
                Ok(Some(query)) => query,
                Ok(None) | Err(AssistantError::Interrupted) => break,
                Err(err) => return Err(err),
            };

            let query = query.trim();
            if query.is_empty() {
                continue;
            }
            if is_exit(query) {
                break;
            }

            match self.engine.run(query, ui).await {
                Ok(run) => {
                    if let Some(response) = run.final_response {
                        ui.show_final(&response);
                    }
                }
                Err(AssistantError::Interrupted) => break,
                Err(err) => {
                    tracing::error!(error = %err, "workflow run failed");
                    ui.show_error(&err.to_string());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_keywords_case_insensitive() {
        assert!(is_exit("exit"));
        assert!(is_exit("EXIT"));
        assert!(is_exit("Exit"));
        assert!(is_exit("quit"));
        assert!(is_exit("QUIT"));
    }

    #[test]
    fn test_non_exit_inputs() {
        assert!(!is_exit("exit now"));
        assert!(!is_exit("vpn not connecting"));
        assert!(!is_exit(""));
    }
}
