//! DeskBuddy - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use deskbuddy::cli::{Args, Commands, Verbosity};
use deskbuddy::config::{Config, StoreMode};
use deskbuddy::doctor::{Doctor, HealthStatus};
use deskbuddy::notify::{MockMailer, NotificationSink};
use deskbuddy::records::memory::{demo_incidents, demo_knowledge_base};
use deskbuddy::records::remote::RemoteNotifier;
use deskbuddy::records::{
    Incident, KnowledgeArticle, RecordStore, RemoteIncidentStore, RemoteKnowledgeStore, ToolClient,
};
use deskbuddy::repl::{ConsoleInteraction, InteractionLoop};
use deskbuddy::summarize::OllamaSummarizer;
use deskbuddy::workflow::WorkflowEngine;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbosity());

    let mut config = match args.config {
        Some(ref path) => Config::load_from(path.clone())?,
        None => Config::load()?,
    };
    args.apply_to(&mut config);

    match args.command {
        None | Some(Commands::Start) => run_assistant(config).await,
        Some(Commands::Doctor) => run_doctor(config).await,
        Some(Commands::Config) => show_config(&config),
    }
}

fn init_tracing(verbosity: Verbosity) {
    let default_filter = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "deskbuddy=debug,info",
        Verbosity::VeryVerbose => "debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Wire the collaborators for the configured store mode and run the loop.
async fn run_assistant(config: Config) -> Result<()> {
    let (knowledge, incidents, notifier): (
        Arc<dyn RecordStore<KnowledgeArticle>>,
        Arc<dyn RecordStore<Incident>>,
        Arc<dyn NotificationSink>,
    ) = match config.stores.mode {
        StoreMode::Memory => (
            Arc::new(demo_knowledge_base()),
            Arc::new(demo_incidents()),
            Arc::new(MockMailer),
        ),
        StoreMode::Remote => {
            let client = Arc::new(ToolClient::new(config.stores.tools_url.clone())?);
            (
                Arc::new(RemoteKnowledgeStore::new(client.clone())),
                Arc::new(RemoteIncidentStore::new(client.clone())),
                Arc::new(RemoteNotifier::new(client)),
            )
        }
    };

    let summarizer = Arc::new(OllamaSummarizer::new(
        config.summarizer.base_url(),
        config.summarizer.model.clone(),
    )?);

    let engine = WorkflowEngine::new(
        knowledge,
        incidents,
        summarizer,
        notifier,
        config.support.to.clone(),
    );

    let mut ui = ConsoleInteraction::with_history(Config::history_path()?)?;
    ui.show_banner(env!("CARGO_PKG_VERSION"), &config.summarizer.model);

    let result = InteractionLoop::new(engine).run(&mut ui).await;
    ui.save()?;

    println!("{}", "Goodbye!".cyan());
    result.map_err(Into::into)
}

async fn run_doctor(config: Config) -> Result<()> {
    println!("{}", "Running diagnostics...".bold());

    let checks = Doctor::new(config).run_diagnostics().await;
    let mut failed = false;

    for check in &checks {
        match &check.status {
            HealthStatus::Pass => {
                println!("{} {}", "✓".green(), check.name);
            }
            HealthStatus::Warn(reason) => {
                println!("{} {} - {}", "⚠".yellow(), check.name, reason.yellow());
            }
            HealthStatus::Fail(reason) => {
                failed = true;
                println!("{} {} - {}", "✗".red(), check.name, reason.red());
            }
        }
    }

    if failed {
        anyhow::bail!("one or more health checks failed");
    }
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    println!("{}", toml::to_string_pretty(config)?);
    println!("# config file: {}", Config::config_path()?.display());
    Ok(())
}
