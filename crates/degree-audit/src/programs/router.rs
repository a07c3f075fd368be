use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use super::service::{AuditOutcome, AuditRequest, AuditService, InlineEvaluationRequest};
use super::ProgramRepository;
use crate::error::AppError;
use crate::transcript::{self, TranscriptCourse};

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptParseRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptParseResponse {
    pub courses: Vec<TranscriptCourse>,
}

/// Router builder exposing graduation audits and transcript extraction.
pub fn audit_router<R>(service: Arc<AuditService<R>>) -> Router
where
    R: ProgramRepository + 'static,
{
    Router::new()
        .route("/api/v1/graduation/audit", post(audit_handler::<R>))
        .route("/api/v1/graduation/evaluate", post(evaluate_handler))
        .route("/api/v1/transcripts/parse", post(parse_transcript_handler))
        .with_state(service)
}

pub(crate) async fn audit_handler<R>(
    State(service): State<Arc<AuditService<R>>>,
    axum::Json(request): axum::Json<AuditRequest>,
) -> Result<axum::Json<AuditOutcome>, AppError>
where
    R: ProgramRepository + 'static,
{
    let outcome = service.audit(&request)?;
    Ok(axum::Json(outcome))
}

pub(crate) async fn evaluate_handler(
    axum::Json(request): axum::Json<InlineEvaluationRequest>,
) -> Response {
    let evaluation = request.evaluate();
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}

pub(crate) async fn parse_transcript_handler(
    axum::Json(request): axum::Json<TranscriptParseRequest>,
) -> Response {
    let courses = transcript::extract_courses(&request.text);
    (
        StatusCode::OK,
        axum::Json(TranscriptParseResponse { courses }),
    )
        .into_response()
}
