// Error taxonomy and user-friendly messages
//
// TriageError is what the triage pipeline and the metrics aggregator hand
// back to callers. The HTTP layer maps each variant to a status code, and
// the message helpers below turn startup failures into actionable text.

use thiserror::Error;

/// Errors produced while triaging a ticket or reading/writing metrics
#[derive(Debug, Error)]
pub enum TriageError {
    /// Missing or malformed request fields (user-correctable)
    #[error("validation error: {0}")]
    Validation(String),

    /// Classifier service unreachable, timed out, or answered with an error
    #[error("classifier unavailable: {message}")]
    ClassifierUnavailable {
        /// True when a later retry by the caller may succeed
        transient: bool,
        message: String,
    },

    /// Classifier answered, but the output does not fit the Classification shape
    #[error("malformed classifier output: {0}")]
    MalformedClassifierOutput(String),

    /// Aggregator state broke one of its own invariants
    #[error("metrics invariant violated: {0}")]
    AggregatorInvariantViolation(String),
}

impl TriageError {
    pub fn validation(message: impl Into<String>) -> Self {
        TriageError::Validation(message.into())
    }

    pub fn transient(message: impl Into<String>) -> Self {
        TriageError::ClassifierUnavailable {
            transient: true,
            message: message.into(),
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        TriageError::ClassifierUnavailable {
            transient: false,
            message: message.into(),
        }
    }

    /// Whether the caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TriageError::ClassifierUnavailable {
                transient: true,
                ..
            }
        )
    }

    /// Short machine-readable kind used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            TriageError::Validation(_) => "validation_error",
            TriageError::ClassifierUnavailable { .. } => "classifier_unavailable",
            TriageError::MalformedClassifierOutput(_) => "malformed_classifier_output",
            TriageError::AggregatorInvariantViolation(_) => "aggregator_invariant_violation",
        }
    }
}

/// Format a missing API key error with helpful suggestions
pub fn api_key_missing_error(config_path: &str) -> String {
    format!(
        "No classifier API key configured\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Config file {} does not exist\n\
        • [provider] section has an empty api_key\n\
        • No API key in the environment\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Export a key for the default Gemini backend:\n\
           \x1b[36mexport GEMINI_API_KEY=\"AI...\"\x1b[0m\n\n\
        2. Or an OpenAI-compatible key:\n\
           \x1b[36mexport OPENAI_API_KEY=\"sk-...\"\x1b[0m\n\n\
        3. Or write the config file:\n\
           \x1b[36m[provider]\n\
           kind = \"gemini\"\n\
           api_key = \"AI...\"\x1b[0m",
        config_path
    )
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(path: &str, error: &str) -> String {
    format!(
        "Failed to parse config file {}\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Validate the file with:\n\
           \x1b[36mhelpdesk-router check-config --config {}\x1b[0m\n\n\
        2. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Unknown provider kind (use \"gemini\" or \"openai\")\n\
           • Numbers written as strings",
        path, error, path
    )
}
