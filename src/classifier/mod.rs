// Classifier adapter
//
// Wraps the external language model. Every operation is one request and
// one response, bounded by a timeout; a timeout is reported as the service
// being unavailable. Nothing is retried here.

mod parser;
mod prompts;
mod types;

pub use parser::parse_classification;
pub use prompts::{GenerationProfile, TranslationTarget};
pub use types::{Category, Classification, Department, Priority, TicketType, MAX_SUMMARY_CHARS};

use std::sync::Arc;
use std::time::Duration;

use crate::errors::TriageError;
use crate::language::Language;
use crate::providers::{LlmProvider, ProviderRequest};

/// Classifier adapter over an injected LLM provider
#[derive(Clone)]
pub struct ClassifierAdapter {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl ClassifierAdapter {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Model name reported by the underlying provider
    pub fn model(&self) -> &str {
        self.provider.default_model()
    }

    /// Classify a ticket into department/priority/type/category
    pub async fn classify(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Classification, TriageError> {
        tracing::info!(%language, "Classifying ticket");

        let prompt = prompts::classification_prompt(text, language);
        let raw = self
            .complete(prompt, GenerationProfile::CLASSIFY, true)
            .await?;

        let classification = parse_classification(&raw)?;
        tracing::debug!(
            department = %classification.department,
            priority = %classification.priority,
            category = classification.category.as_str(),
            confidence = classification.confidence,
            "Ticket classified"
        );
        Ok(classification)
    }

    /// Draft a reply an operator can send to the requester
    pub async fn generate_operator_reply(
        &self,
        text: &str,
        language: Language,
    ) -> Result<String, TriageError> {
        tracing::info!(%language, "Generating operator reply");
        let prompt = prompts::operator_reply_prompt(text, language);
        self.complete_text(prompt, GenerationProfile::OPERATOR_REPLY)
            .await
    }

    /// Translate text into the target language
    pub async fn translate(
        &self,
        text: &str,
        target: TranslationTarget,
    ) -> Result<String, TriageError> {
        tracing::info!(%target, "Translating text");
        let prompt = prompts::translation_prompt(text, target);
        self.complete_text(prompt, GenerationProfile::TRANSLATE)
            .await
    }

    /// Summarize a support conversation in 3-5 sentences
    pub async fn summarize(
        &self,
        conversation: &str,
        language: Language,
    ) -> Result<String, TriageError> {
        tracing::info!(%language, "Summarizing conversation");
        let prompt = prompts::summary_prompt(conversation, language);
        self.complete_text(prompt, GenerationProfile::SUMMARIZE)
            .await
    }

    /// Free-text completion; an empty answer is malformed output
    async fn complete_text(
        &self,
        prompt: String,
        profile: GenerationProfile,
    ) -> Result<String, TriageError> {
        let text = self.complete(prompt, profile, false).await?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TriageError::MalformedClassifierOutput(
                "empty response".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    async fn complete(
        &self,
        prompt: String,
        profile: GenerationProfile,
        json_output: bool,
    ) -> Result<String, TriageError> {
        let request = ProviderRequest::new(prompt)
            .with_temperature(profile.temperature)
            .with_max_tokens(profile.max_tokens)
            .with_json_output(json_output && self.provider.supports_json_output());

        match tokio::time::timeout(self.timeout, self.provider.send_message(&request)).await {
            Ok(Ok(response)) => Ok(response.text),
            Ok(Err(e)) => {
                tracing::warn!(provider = self.provider.name(), error = %e, "Classifier call failed");
                Err(e)
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Classifier call timed out"
                );
                Err(TriageError::transient(format!(
                    "{} did not answer within {:?}",
                    self.provider.name(),
                    self.timeout
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider returning a canned answer and recording what it was asked
    struct CannedProvider {
        answer: String,
        delay: Duration,
        seen: Mutex<Vec<ProviderRequest>>,
    }

    impl CannedProvider {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                delay: Duration::ZERO,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn send_message(
            &self,
            request: &ProviderRequest,
        ) -> Result<ProviderResponse, TriageError> {
            self.seen.lock().unwrap().push(request.clone());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(ProviderResponse {
                text: self.answer.clone(),
                model: "canned".to_string(),
                stop_reason: None,
                provider: "canned".to_string(),
            })
        }

        fn name(&self) -> &str {
            "canned"
        }

        fn default_model(&self) -> &str {
            "canned-model"
        }
    }

    const ANSWER: &str = "```json\n{\"department\":\"IT_INFRASTRUCTURE\",\"priority\":\"CRITICAL\",\"type\":\"INCIDENT\",\"category\":\"vpn_access\",\"language\":\"ru\",\"summary\":\"VPN недоступен\",\"is_auto_solvable\":false,\"confidence\":0.8}\n```";

    #[tokio::test]
    async fn test_classify_uses_low_variance_json_profile() {
        let provider = Arc::new(CannedProvider::new(ANSWER));
        let adapter = ClassifierAdapter::new(provider.clone(), Duration::from_secs(5));

        let c = adapter.classify("VPN не работает", Language::Ru).await.unwrap();
        assert_eq!(c.priority, Priority::Critical);

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].temperature, Some(0.1));
        assert_eq!(seen[0].max_tokens, 500);
        assert!(seen[0].json_output);
    }

    #[tokio::test]
    async fn test_reply_uses_creative_profile() {
        let provider = Arc::new(CannedProvider::new("  Здравствуйте!  "));
        let adapter = ClassifierAdapter::new(provider.clone(), Duration::from_secs(5));

        let reply = adapter
            .generate_operator_reply("Где мой ноутбук?", Language::Ru)
            .await
            .unwrap();
        assert_eq!(reply, "Здравствуйте!");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].temperature, Some(0.7));
        assert!(!seen[0].json_output);
    }

    #[tokio::test]
    async fn test_empty_text_answer_is_malformed() {
        let adapter = ClassifierAdapter::new(Arc::new(CannedProvider::new("   ")), Duration::from_secs(5));
        let err = adapter.summarize("dialog", Language::Kk).await.unwrap_err();
        assert!(matches!(err, TriageError::MalformedClassifierOutput(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_transient_unavailability() {
        let mut provider = CannedProvider::new(ANSWER);
        provider.delay = Duration::from_millis(200);
        let adapter = ClassifierAdapter::new(Arc::new(provider), Duration::from_millis(20));

        let err = adapter.classify("VPN", Language::Ru).await.unwrap_err();
        assert!(matches!(err, TriageError::ClassifierUnavailable { .. }));
        assert!(err.is_retryable());
    }
}
