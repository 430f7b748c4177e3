use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub stores: StoresConfig,
    #[serde(default)]
    pub support: SupportConfig,
}

/// Ollama endpoint and model used for suggested fixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        SummarizerConfig {
            host: "127.0.0.1".to_string(),
            port: 11434,
            model: "qwen2.5:7b-instruct".to_string(),
        }
    }
}

impl SummarizerConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Which store backend serves searches and inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// In-process stores with demo seed data
    Memory,
    /// Tool service over HTTP
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresConfig {
    pub mode: StoreMode,
    pub tools_url: String,
}

impl Default for StoresConfig {
    fn default() -> Self {
        StoresConfig {
            mode: StoreMode::Memory,
            tools_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportConfig {
    /// Address notified when an incident is created
    pub to: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        SupportConfig {
            to: "support@example.com".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if !config_path.exists() {
            let config = Config::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(config_path, toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;

        Ok(home.join(".deskbuddy").join("config.toml"))
    }

    /// Default input-history path, next to the config file.
    pub fn history_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;

        Ok(home.join(".deskbuddy").join("history"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.summarizer.base_url(), "http://127.0.0.1:11434");
        assert_eq!(config.stores.mode, StoreMode::Memory);
        assert_eq!(config.support.to, "support@example.com");
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.summarizer.model = "llama3.1:8b".to_string();
        config.stores.mode = StoreMode::Remote;

        let toml_string = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(back.summarizer.model, "llama3.1:8b");
        assert_eq!(back.stores.mode, StoreMode::Remote);
    }

    #[test]
    fn test_store_mode_lowercase_spelling() {
        let parsed: Config = toml::from_str(
            r#"
            [stores]
            mode = "remote"
            tools_url = "http://tools.internal:8000"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.stores.mode, StoreMode::Remote);
        assert_eq!(parsed.stores.tools_url, "http://tools.internal:8000");
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::load_from(path.clone()).unwrap();
        assert!(path.exists());
        assert_eq!(config.stores.mode, StoreMode::Memory);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [summarizer]
            host = "ollama.internal"
            port = 11434
            model = "qwen2.5:7b-instruct"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.summarizer.host, "ollama.internal");
        assert_eq!(parsed.support.to, "support@example.com");
    }
}
