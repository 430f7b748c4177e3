//! Command-line argument parsing for DeskBuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::config::{Config, StoreMode};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DeskBuddy - terminal IT-support assistant
#[derive(Parser, Debug)]
#[command(name = "deskbuddy")]
#[command(version)]
#[command(about = "Search knowledge and incident history, suggest a fix, escalate what stays broken", long_about = None)]
pub struct Args {
    /// Ollama model used for suggested fixes
    #[arg(short, long)]
    pub model: Option<String>,

    /// Ollama host
    #[arg(long)]
    pub host: Option<String>,

    /// Ollama port
    #[arg(long)]
    pub port: Option<u16>,

    /// Tool service base URL (remote store mode)
    #[arg(long)]
    pub tools_url: Option<String>,

    /// Use the in-process demo stores instead of the tool service
    #[arg(long)]
    pub local: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive assistant (default)
    Start,

    /// Run health checks against the summarizer and tool service
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Fold command-line overrides into the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref model) = self.model {
            config.summarizer.model = model.clone();
        }
        if let Some(ref host) = self.host {
            config.summarizer.host = host.clone();
        }
        if let Some(port) = self.port {
            config.summarizer.port = port;
        }
        if let Some(ref tools_url) = self.tools_url {
            config.stores.tools_url = tools_url.clone();
            config.stores.mode = StoreMode::Remote;
        }
        if self.local {
            config.stores.mode = StoreMode::Memory;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["deskbuddy"]);
        assert!(args.command.is_none());
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Args::parse_from(["deskbuddy", "-v"]).verbosity(), Verbosity::Verbose);
        assert_eq!(Args::parse_from(["deskbuddy", "-vv"]).verbosity(), Verbosity::VeryVerbose);
        assert_eq!(Args::parse_from(["deskbuddy", "-q"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = Args::parse_from([
            "deskbuddy",
            "--model",
            "llama3.1:8b",
            "--tools-url",
            "http://tools.internal:8000",
        ]);

        let mut config = Config::default();
        args.apply_to(&mut config);

        assert_eq!(config.summarizer.model, "llama3.1:8b");
        assert_eq!(config.stores.tools_url, "http://tools.internal:8000");
        assert_eq!(config.stores.mode, StoreMode::Remote);
    }

    #[test]
    fn test_local_flag_wins_over_tools_url() {
        let args = Args::parse_from([
            "deskbuddy",
            "--tools-url",
            "http://tools.internal:8000",
            "--local",
        ]);

        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.stores.mode, StoreMode::Memory);
    }

    #[test]
    fn test_doctor_subcommand() {
        let args = Args::parse_from(["deskbuddy", "doctor"]);
        assert!(matches!(args.command, Some(Commands::Doctor)));
    }
}
