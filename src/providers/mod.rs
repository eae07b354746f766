// Classifier service providers
//
// The classifier adapter talks to an external language model through this
// trait. Each provider turns a ProviderRequest into one HTTP exchange: no
// retries and no streaming. Failures come back already sorted into
// transient (worth retrying later) and permanent ones.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::errors::TriageError;

pub mod types;

// Provider implementations
pub mod gemini;
pub mod openai;

// Provider factory
pub mod factory;

pub use factory::create_provider;
pub use types::{ProviderRequest, ProviderResponse};

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a prompt and wait for the complete response
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse, TriageError>;

    /// Get the provider name (e.g., "gemini", "openai")
    fn name(&self) -> &str;

    /// Get the default model for this provider
    fn default_model(&self) -> &str;

    /// Whether the provider can be asked for JSON-only output
    fn supports_json_output(&self) -> bool {
        true
    }
}

/// Map a non-success HTTP status to a classifier error
///
/// Throttling, request timeouts and server errors are transient; anything
/// else (bad key, unknown model, malformed request) will fail again.
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> TriageError {
    let message = format!("{} API request failed with status {}: {}", provider, status, body);
    if status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
    {
        TriageError::transient(message)
    } else {
        TriageError::permanent(message)
    }
}

/// Map a transport-level reqwest failure to a classifier error
pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> TriageError {
    let message = format!("Failed to reach {} API: {}", provider, err);
    if err.is_timeout() || err.is_connect() || err.is_request() {
        TriageError::transient(message)
    } else {
        TriageError::permanent(message)
    }
}
