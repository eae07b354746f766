// Triage pipeline
//
// detect language -> classify -> decide route -> record metrics.
// Metrics are only touched once the route is known; a failed classification
// leaves them unchanged apart from the malformed-output diagnostic.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::classifier::{ClassifierAdapter, Classification, Department, TranslationTarget};
use crate::errors::TriageError;
use crate::language::{self, Language};
use crate::metrics::{MetricsAggregator, TicketOutcome};
use crate::router::{self, RouteDecision};

/// Result of running one ticket through the pipeline
#[derive(Debug, Clone)]
pub struct TriageResult {
    pub ticket_id: Uuid,
    pub language: Language,
    pub decision: RouteDecision,
    pub response_time_ms: u64,
}

/// Wire shape of a classify answer
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResponse {
    pub success: bool,
    pub ticket_id: Uuid,
    pub auto_resolved: bool,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_response: Option<String>,
    pub message: String,
    pub response_time_ms: u64,
}

impl From<&TriageResult> for ClassifyResponse {
    fn from(result: &TriageResult) -> Self {
        let message = result.decision.message();
        let (solution, assigned_to, estimated_response) = match &result.decision {
            RouteDecision::AutoResolved { solution, .. } => (Some(solution.clone()), None, None),
            RouteDecision::Escalated {
                assigned_department,
                estimated_response,
                ..
            } => (None, Some(*assigned_department), Some(estimated_response.clone())),
        };

        Self {
            success: true,
            ticket_id: result.ticket_id,
            auto_resolved: result.decision.is_auto_resolved(),
            classification: result.decision.classification().clone(),
            solution,
            assigned_to,
            estimated_response,
            message,
            response_time_ms: result.response_time_ms,
        }
    }
}

/// Orchestrates the classifier, router and metrics aggregator
#[derive(Clone)]
pub struct TriageService {
    classifier: ClassifierAdapter,
    metrics: Arc<MetricsAggregator>,
}

impl TriageService {
    pub fn new(classifier: ClassifierAdapter, metrics: Arc<MetricsAggregator>) -> Self {
        Self {
            classifier,
            metrics,
        }
    }

    pub fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    pub fn metrics(&self) -> &Arc<MetricsAggregator> {
        &self.metrics
    }

    /// Triage a ticket and record its outcome
    pub async fn process(&self, text: &str) -> Result<TriageResult, TriageError> {
        let result = self.triage(text).await?;

        let outcome = TicketOutcome {
            ticket_id: result.ticket_id,
            ..TicketOutcome::new(
                result.decision.classification().clone(),
                result.decision.is_auto_resolved(),
                result.response_time_ms,
            )
        };
        self.metrics.record(&outcome)?;

        tracing::info!(
            ticket_id = %result.ticket_id,
            route = result.decision.as_str(),
            response_time_ms = result.response_time_ms,
            "Ticket triaged"
        );
        Ok(result)
    }

    /// Triage a ticket without recording metrics
    pub async fn triage(&self, text: &str) -> Result<TriageResult, TriageError> {
        let text = require_text(text)?;
        let language = language::detect(text);
        let started = Instant::now();

        let classification = match self.classifier.classify(text, language).await {
            Ok(classification) => classification,
            Err(e) => {
                if matches!(e, TriageError::MalformedClassifierOutput(_)) {
                    self.metrics.record_malformed_output();
                }
                return Err(e);
            }
        };

        if classification.language != language {
            tracing::debug!(
                detected = %language,
                classified = %classification.language,
                "Classifier language differs from detected language"
            );
        }

        // Knowledge base and messages follow the detected language
        let decision = router::decide(classification, language);
        let response_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        Ok(TriageResult {
            ticket_id: Uuid::new_v4(),
            language,
            decision,
            response_time_ms,
        })
    }

    /// Draft an operator reply in the ticket's language
    pub async fn assist(&self, text: &str) -> Result<(String, Language), TriageError> {
        let text = require_text(text)?;
        let language = language::detect(text);
        let reply = self.classifier.generate_operator_reply(text, language).await?;
        Ok((reply, language))
    }

    pub async fn translate(
        &self,
        text: &str,
        target: TranslationTarget,
    ) -> Result<String, TriageError> {
        let text = require_text(text)?;
        self.classifier.translate(text, target).await
    }

    /// Summarize a conversation in its own language
    pub async fn summarize(&self, conversation: &str) -> Result<(String, Language), TriageError> {
        let conversation = require_text(conversation)?;
        let language = language::detect(conversation);
        let summary = self.classifier.summarize(conversation, language).await?;
        Ok((summary, language))
    }
}

fn require_text(text: &str) -> Result<&str, TriageError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TriageError::validation("text is required"));
    }
    Ok(trimmed)
}
