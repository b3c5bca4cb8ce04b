use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::infra::AppState;
use maturity_assessment::assessment::{
    assessment_router, Answer, AnswerRecord, AssessmentReport, AssessmentReportSummary,
    AssessmentService, ClassificationBands, Recommendations, ServiceError, SessionRepository,
};
use maturity_assessment::error::AppError;

pub(crate) fn with_assessment_routes<R>(service: Arc<AssessmentService<R>>) -> axum::Router
where
    R: SessionRepository + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessments/report",
            axum::routing::post(standalone_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless report computation: callers post the flat answer array they
/// already hold (an export, a backup, another system's data) and get the
/// same report a stored session would produce.
#[derive(Debug, Deserialize)]
pub(crate) struct StandaloneReportRequest {
    pub(crate) answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub(crate) bands: Option<ClassificationBands>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StandaloneReportResponse {
    #[serde(flatten)]
    pub(crate) summary: AssessmentReportSummary,
    pub(crate) recommendations: Recommendations,
}

pub(crate) async fn standalone_report_endpoint(
    Json(payload): Json<StandaloneReportRequest>,
) -> Result<Json<StandaloneReportResponse>, AppError> {
    let StandaloneReportRequest { answers, bands } = payload;
    let bands = bands.unwrap_or_default().normalized();

    let answers: Vec<Answer> = answers
        .into_iter()
        .map(Answer::try_from)
        .collect::<Result<_, _>>()
        .map_err(|err| AppError::from(ServiceError::from(err)))?;

    let report = AssessmentReport::build(&answers, &bands);
    let summary = report.summary();
    let recommendations = summary.recommendations(&bands);

    Ok(Json(StandaloneReportResponse {
        summary,
        recommendations,
    }))
}
