// HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use super::HelpdeskServer;
use crate::classifier::TranslationTarget;
use crate::errors::TriageError;
use crate::language::Language;
use crate::metrics::{render_prometheus, MetricsView, Period};
use crate::triage::ClassifyResponse;

/// Create the main application router
pub fn create_router(server: Arc<HelpdeskServer>) -> Router {
    use super::error_report_handler::handle_error_report;

    Router::new()
        .route("/classify", post(handle_classify))
        .route("/metrics", get(get_metrics))
        .route("/metrics/errors", post(handle_error_report))
        .route("/metrics/prometheus", get(prometheus_endpoint))
        .route("/health", get(health_check))
        .with_state(server)
}

/// Request body for POST /classify
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// Ticket text, or the conversation to summarize
    #[serde(default, alias = "prompt")]
    pub text: Option<String>,
    /// classify (default), assist, translate or summarize
    #[serde(default)]
    pub action: Option<String>,
    /// Translation target, defaults to ru
    #[serde(
        default,
        rename = "targetLanguage",
        alias = "target_language",
        alias = "targetLang"
    )]
    pub target_language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Classify,
    Assist,
    Translate,
    Summarize,
}

impl FromStr for Action {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classify" => Ok(Action::Classify),
            "assist" => Ok(Action::Assist),
            "translate" => Ok(Action::Translate),
            "summarize" => Ok(Action::Summarize),
            other => Err(TriageError::validation(format!(
                "unknown action '{}', expected one of: classify, assist, translate, summarize",
                other
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub success: bool,
    pub suggested_response: String,
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub original: String,
    pub translated: String,
    pub target_language: TranslationTarget,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub summary: String,
    pub language: Language,
}

/// Handle POST /classify - Ticket intake and operator helpers
async fn handle_classify(
    State(server): State<Arc<HelpdeskServer>>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| TriageError::validation(e.body_text()))?;

    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| TriageError::validation("text is required"))?;
    let action = request.action.as_deref().unwrap_or("classify").parse::<Action>()?;

    tracing::info!(?action, text_len = text.len(), "Received /classify request");

    let triage = server.triage();
    let response = match action {
        Action::Classify => {
            let result = triage.process(&text).await?;
            Json(ClassifyResponse::from(&result)).into_response()
        }
        Action::Assist => {
            let (suggested_response, language) = triage.assist(&text).await?;
            Json(AssistResponse {
                success: true,
                suggested_response,
                language,
            })
            .into_response()
        }
        Action::Translate => {
            let target = match request.target_language.as_deref() {
                Some(code) => code.parse::<TranslationTarget>().map_err(TriageError::Validation)?,
                None => TranslationTarget::default(),
            };
            let translated = triage.translate(&text, target).await?;
            Json(TranslateResponse {
                success: true,
                original: text,
                translated,
                target_language: target,
            })
            .into_response()
        }
        Action::Summarize => {
            let (summary, language) = triage.summarize(&text).await?;
            Json(SummarizeResponse {
                success: true,
                summary,
                language,
            })
            .into_response()
        }
    };

    Ok(response)
}

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub view: MetricsView,
}

/// Handle GET /metrics - Counters, breakdowns and derived analytics
async fn get_metrics(
    State(server): State<Arc<HelpdeskServer>>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<MetricsResponse>, AppError> {
    let period = match query.period.as_deref() {
        Some(p) => p.parse::<Period>().map_err(TriageError::Validation)?,
        None => Period::All,
    };

    Ok(Json(MetricsResponse {
        success: true,
        view: server.metrics().snapshot(period),
    }))
}

/// Handle GET /metrics/prometheus - Text exposition format
async fn prometheus_endpoint(
    State(server): State<Arc<HelpdeskServer>>,
) -> Result<Response, AppError> {
    let body = render_prometheus(&server.metrics().snapshot(Period::All))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct Features {
    pub auto_classification: bool,
    pub auto_resolution: bool,
    pub multilingual: bool,
    pub operator_assist: bool,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    pub ai_model: String,
    pub features: Features,
    pub supported_languages: Vec<Language>,
    pub integration_channels: Vec<&'static str>,
}

/// Handle GET /health - Static capability descriptor
pub async fn health_check(State(server): State<Arc<HelpdeskServer>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        uptime_seconds: server.uptime_seconds(),
        ai_model: server.triage().classifier().model().to_string(),
        features: Features {
            auto_classification: true,
            auto_resolution: true,
            multilingual: true,
            operator_assist: true,
        },
        supported_languages: Language::ALL.to_vec(),
        integration_channels: vec!["email", "chat", "portal", "api"],
    })
}

/// Application error wrapper for proper HTTP error responses
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, retryable) = match self.0.downcast_ref::<TriageError>() {
            Some(e @ TriageError::Validation(_)) => (StatusCode::BAD_REQUEST, e.kind(), false),
            Some(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.kind(), e.is_retryable()),
            None => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", false),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, kind, "Request failed");
        } else {
            tracing::warn!(error = %self.0, kind, "Request rejected");
        }

        let body = serde_json::json!({
            "success": false,
            "error": {
                "message": self.0.to_string(),
                "type": kind,
                "retryable": retryable,
            }
        });

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_request_accepts_aliases() {
        let request: ClassifyRequest =
            serde_json::from_str(r#"{"prompt":"Сәлем","action":"translate","targetLang":"en"}"#)
                .unwrap();
        assert_eq!(request.text.as_deref(), Some("Сәлем"));
        assert_eq!(request.target_language.as_deref(), Some("en"));
    }

    #[test]
    fn test_unknown_action_is_validation_error() {
        let err = "escalate".parse::<Action>().unwrap_err();
        assert!(matches!(err, TriageError::Validation(_)));
        assert_eq!("summarize".parse::<Action>().unwrap(), Action::Summarize);
    }

    #[test]
    fn test_app_error_status_mapping() {
        let response = AppError::from(TriageError::validation("text is required")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from(TriageError::transient("timeout")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::from(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
