// Provider Configuration - classifier backend selection

use serde::{Deserialize, Serialize};

/// Which API the classifier adapter talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini (generateContent API)
    #[default]
    Gemini,

    /// OpenAI or any compatible chat completions endpoint
    OpenAI,
}

impl ProviderKind {
    /// Get short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAI => "openai",
        }
    }

    /// Environment variable consulted when no key is configured
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAI => "OPENAI_API_KEY",
        }
    }
}

/// Classifier backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Selected provider
    #[serde(default)]
    pub kind: ProviderKind,

    /// API key (falls back to the provider's environment variable)
    #[serde(default)]
    pub api_key: String,

    /// Model override (provider default when absent)
    #[serde(default)]
    pub model: Option<String>,

    /// Endpoint override for proxies or compatible gateways
    #[serde(default)]
    pub base_url: Option<String>,

    /// Set by the loader when the key came from the environment
    #[serde(skip)]
    pub api_key_from_env: bool,
}

impl ProviderConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
