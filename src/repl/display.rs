//! Terminal rendering for the interactive session
//!
//! Banner, search spinner, result tables, and color-coded panels.

use crate::records::{Incident, KnowledgeArticle};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const PANEL_WIDTH: usize = 64;

/// Console renderer for the assistant UI.
pub struct ConsoleDisplay {
    spinner: Option<ProgressBar>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        ConsoleDisplay { spinner: None }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, model: &str) {
        let rule = "=".repeat(PANEL_WIDTH);
        println!("\n{}", rule.cyan());
        println!("{}", format!("  DeskBuddy {} - IT Support Assistant", version).bold().cyan());
        println!("{}", format!("  Model: {} | Type 'exit' to quit", model).dimmed());
        println!("{}\n", rule.cyan());
    }

    /// Spinner shown while the stores and summarizer are working.
    pub fn start_searching(&mut self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Searching knowledge base and incidents...");
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    pub fn finish_searching(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    /// Knowledge base results table
    pub fn show_kb_table(&self, articles: &[KnowledgeArticle]) {
        self.show_section("Knowledge Base Results");
        println!(
            "  {:<12} {:<42} {:<12} {}",
            "Number".bold(),
            "Short Description".bold(),
            "Category".bold(),
            "Author".bold()
        );

        if articles.is_empty() {
            println!("  {}", "No KB articles found".dimmed());
            return;
        }

        for article in articles {
            println!(
                "  {:<12} {:<42} {:<12} {}",
                article.number.cyan(),
                clip(&article.short_description, 40).green(),
                clip(&article.category, 12),
                clip(&article.author, 20).yellow()
            );
        }
    }

    /// Related incidents table
    pub fn show_incident_table(&self, incidents: &[Incident]) {
        self.show_section("Related Incidents");
        println!(
            "  {:<20} {:<42} {}",
            "Number".bold(),
            "Short Description".bold(),
            "State".bold()
        );

        if incidents.is_empty() {
            println!("  {}", "No incidents found".dimmed());
            return;
        }

        for incident in incidents {
            println!(
                "  {:<20} {:<42} {}",
                incident.number.cyan(),
                clip(&incident.short_description, 40).green(),
                incident.state.to_string().yellow()
            );
        }
    }

    /// Suggested fix panel
    pub fn show_suggestion(&self, text: &str) {
        self.show_section("Suggested Fix");
        for line in text.lines() {
            println!("  {}", line);
        }
        println!();
    }

    /// Final response panel
    pub fn show_final(&self, text: &str) {
        let rule = "-".repeat(PANEL_WIDTH);
        println!("\n{}", rule.cyan());
        println!("  {}", text.bold().cyan());
        println!("{}\n", rule.cyan());
    }

    pub fn show_error(&self, message: &str) {
        println!("{} {}", "Error:".red().bold(), message.red());
    }

    pub fn show_info(&self, message: &str) {
        println!("{} {}", "Info:".cyan(), message);
    }

    /// Section header with underline
    fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(PANEL_WIDTH).cyan());
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate to `max` characters with a trailing ellipsis.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
