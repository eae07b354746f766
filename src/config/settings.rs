// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::provider::ProviderConfig;
use crate::metrics::CostModel;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Classifier backend
    #[serde(default)]
    pub provider: ProviderConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Classifier call settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Metrics retention and error-report logging
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Cost constants for the savings view
    #[serde(default)]
    pub cost: CostModel,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Append daemon logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Upper bound on a single classifier call; exceeding it counts as unavailable
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Number of recent tickets kept for period views and error-report linking
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Append classification error reports to this JSONL file
    #[serde(default)]
    pub error_log_path: Option<PathBuf>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            error_log_path: None,
        }
    }
}

fn default_history_capacity() -> usize {
    10_000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Raise the default log level to debug
    #[serde(default)]
    pub debug_logging: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.classifier.timeout_secs, 30);
        assert_eq!(config.metrics.history_capacity, 10_000);
        assert_eq!(config.cost.manual_ticket_cost, 500.0);
        assert!(!config.features.debug_logging);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [server]
            bind_address = "0.0.0.0:9000"

            [cost]
            manual_ticket_cost = 700.0
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.cost.manual_ticket_cost, 700.0);
        assert_eq!(config.cost.auto_ticket_cost, 50.0);
    }
}
