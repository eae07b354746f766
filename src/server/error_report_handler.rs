// Classification-error report handler
//
// Operators report tickets that were routed to the wrong department. The
// report bumps the error counter and is logged for offline review.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::handlers::AppError;
use super::HelpdeskServer;
use crate::errors::TriageError;
use crate::metrics::ErrorReport;

/// Response body for /metrics/errors
#[derive(Debug, Serialize)]
pub struct ErrorReportResponse {
    pub success: bool,
    pub message: String,
    /// Whether the ticket id matched a recently recorded ticket
    pub linked: bool,
}

/// Handle POST /metrics/errors - Report a misclassification
pub async fn handle_error_report(
    State(server): State<Arc<HelpdeskServer>>,
    payload: Result<Json<ErrorReport>, JsonRejection>,
) -> Result<Json<ErrorReportResponse>, AppError> {
    let Json(report) = match payload {
        Ok(json) => json,
        // Fields missing or of the wrong type
        Err(JsonRejection::JsonDataError(e)) => {
            return Err(TriageError::validation(e.body_text()).into());
        }
        Err(other) => return Err(anyhow::anyhow!(other.body_text()).into()),
    };

    info!(
        ticket_id = %report.ticket_id,
        predicted = %report.predicted_department,
        actual = %report.actual_department,
        "Received classification error report"
    );

    let linked = server.metrics().record_classification_error(&report)?;

    Ok(Json(ErrorReportResponse {
        success: true,
        message: "Ошибка зарегистрирована для улучшения модели".to_string(),
        linked,
    }))
}
