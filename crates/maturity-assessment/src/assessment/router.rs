use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{AnswerRecord, CompanyProfile, SessionId};
use super::report::views::{AssessmentReportSummary, Recommendations};
use super::repository::{RepositoryError, SessionRepository};
use super::service::{AssessmentService, ServiceError};

/// Router builder exposing the session lifecycle and reporting endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments",
            post(create_handler::<R>).get(list_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:session_id",
            get(session_handler::<R>).delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:session_id/answers",
            post(submit_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:session_id/results",
            get(results_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:session_id/report",
            get(report_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:session_id/close",
            post(close_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
struct ReportResponse {
    #[serde(flatten)]
    summary: AssessmentReportSummary,
    recommendations: Recommendations,
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(company): axum::Json<CompanyProfile>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.create(company) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.session_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.list() {
        Ok(records) => {
            let views: Vec<_> = records
                .iter()
                .map(|record| record.session_view())
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.session_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(records): axum::Json<Vec<AnswerRecord>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.submit(&SessionId(session_id), records) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn results_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.results(&SessionId(session_id)) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.report(&SessionId(session_id)) {
        Ok(summary) => {
            let recommendations = summary.recommendations(service.bands());
            let response = ReportResponse {
                summary,
                recommendations,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.close(&SessionId(session_id)) {
        Ok(session) => {
            let payload = json!({
                "session_id": session.id,
                "status": session.status().label(),
                "closed_at": session.closed_at,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.delete(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Repository(RepositoryError::Conflict) | ServiceError::SessionClosed(_) => {
            StatusCode::CONFLICT
        }
        ServiceError::Store(_) | ServiceError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
