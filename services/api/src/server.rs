use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{
    builtin_template, default_classification_bands, load_template, AppState,
    InMemorySessionRepository,
};
use crate::routes::with_assessment_routes;
use maturity_assessment::assessment::AssessmentService;
use maturity_assessment::config::AppConfig;
use maturity_assessment::error::AppError;
use maturity_assessment::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(template) = args.template.take() {
        config.template_path = Some(template);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let template = match &config.template_path {
        Some(path) => load_template(path)?,
        None => builtin_template()?,
    };
    info!(
        template = %template.code,
        questions = template.question_count(),
        "assessment template loaded"
    );

    let repository = Arc::new(InMemorySessionRepository::default());
    let service = Arc::new(AssessmentService::new(
        repository,
        template,
        default_classification_bands(),
    ));

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "maturity assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
