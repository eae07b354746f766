// Unified request/response types for classifier providers
//
// These types abstract over provider-specific formats (Gemini, OpenAI)
// so the classifier adapter works with a single shape.

use serde::Serialize;

/// Unified request format for all LLM providers
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRequest {
    /// Full prompt sent as a single user turn
    pub prompt: String,

    /// Model name (provider-specific, empty = provider default)
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature (0.0 to 1.0, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Ask the provider for a JSON-only answer
    pub json_output: bool,
}

impl ProviderRequest {
    /// Create a new request from a prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: String::new(), // Will be set by provider
            max_tokens: 1024,
            temperature: None,
            json_output: false,
        }
    }

    /// Set the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request structured JSON output
    pub fn with_json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }
}

/// Unified response format from LLM providers
#[derive(Debug, Clone, Serialize)]
pub struct ProviderResponse {
    /// Generated text
    pub text: String,

    /// Model that generated the response
    pub model: String,

    /// Why the model stopped generating
    pub stop_reason: Option<String>,

    /// Provider name (e.g., "gemini", "openai")
    pub provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ProviderRequest::new("hello")
            .with_model("gemini-2.0-flash-exp")
            .with_max_tokens(500)
            .with_temperature(0.1)
            .with_json_output(true);

        assert_eq!(request.prompt, "hello");
        assert_eq!(request.model, "gemini-2.0-flash-exp");
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.temperature, Some(0.1));
        assert!(request.json_output);
    }
}
