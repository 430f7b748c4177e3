//! Doctor command for system diagnostics
//!
//! Health checks for the external collaborators: the summarizer endpoint,
//! the configured model, and the tool service when remote stores are in
//! use.

use crate::config::{Config, StoreMode};
use crate::records::ToolClient;
use crate::summarize::OllamaSummarizer;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
}

impl Doctor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = Vec::new();

        checks.push(self.check_summarizer_api().await);
        checks.push(self.check_model_available().await);
        checks.push(self.check_tool_service().await);

        checks
    }

    /// Check 1: summarizer endpoint reachable
    async fn check_summarizer_api(&self) -> HealthCheck {
        let name = "Summarizer API".to_string();

        let summarizer = match OllamaSummarizer::new(
            self.config.summarizer.base_url(),
            self.config.summarizer.model.clone(),
        ) {
            Ok(summarizer) => summarizer,
            Err(e) => {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(format!("client error: {}", e)),
                }
            }
        };

        if summarizer.is_available().await {
            HealthCheck {
                name,
                status: HealthStatus::Pass,
            }
        } else {
            HealthCheck {
                name,
                status: HealthStatus::Fail(format!(
                    "Ollama not reachable at {}",
                    self.config.summarizer.base_url()
                )),
            }
        }
    }

    /// Check 2: configured model installed
    async fn check_model_available(&self) -> HealthCheck {
        let name = "Model Available".to_string();
        let wanted = &self.config.summarizer.model;

        let summarizer = match OllamaSummarizer::new(
            self.config.summarizer.base_url(),
            wanted.clone(),
        ) {
            Ok(summarizer) => summarizer,
            Err(e) => {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(format!("client error: {}", e)),
                }
            }
        };

        match summarizer.list_models().await {
            Ok(models) if models.iter().any(|m| m == wanted) => HealthCheck {
                name,
                status: HealthStatus::Pass,
            },
            Ok(_) => HealthCheck {
                name,
                status: HealthStatus::Warn(format!("model '{}' not installed", wanted)),
            },
            Err(e) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!("cannot list models: {}", e)),
            },
        }
    }

    /// Check 3: tool service reachable (remote store mode only)
    async fn check_tool_service(&self) -> HealthCheck {
        let name = "Tool Service".to_string();

        if self.config.stores.mode == StoreMode::Memory {
            return HealthCheck {
                name,
                status: HealthStatus::Warn("memory store mode; tool service not in use".to_string()),
            };
        }

        let client = match ToolClient::new(self.config.stores.tools_url.clone()) {
            Ok(client) => client,
            Err(e) => {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(format!("client error: {}", e)),
                }
            }
        };

        if client.is_available().await {
            HealthCheck {
                name,
                status: HealthStatus::Pass,
            }
        } else {
            HealthCheck {
                name,
                status: HealthStatus::Fail(format!(
                    "tool service not reachable at {}",
                    self.config.stores.tools_url
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_mode_skips_tool_service() {
        let doctor = Doctor::new(Config::default());
        let check = doctor.check_tool_service().await;
        assert!(matches!(check.status, HealthStatus::Warn(_)));
    }

    #[tokio::test]
    async fn test_unreachable_summarizer_fails_check() {
        let mut config = Config::default();
        config.summarizer.port = 9; // discard port, nothing listening
        let doctor = Doctor::new(config);

        let check = doctor.check_summarizer_api().await;
        assert!(matches!(check.status, HealthStatus::Fail(_)));
    }
}
