// Provider factory
//
// Creates the classifier provider based on configuration

use anyhow::{bail, Result};

use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::LlmProvider;
use crate::config::{ProviderConfig, ProviderKind};

/// Create a provider based on the provider configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn LlmProvider>> {
    if !config.has_api_key() {
        bail!("No API key configured for provider: {}", config.kind.name());
    }

    match config.kind {
        ProviderKind::Gemini => {
            let mut provider = GeminiProvider::new(config.api_key.clone())?;
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(Box::new(provider))
        }

        ProviderKind::OpenAI => {
            let mut provider = OpenAIProvider::new(config.api_key.clone())?;
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(Box::new(provider))
        }
    }
}
