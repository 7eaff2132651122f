use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAttemptRepository};
use crate::routes::with_gift_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gifts_engine::config::AppConfig;
use gifts_engine::error::AppError;
use gifts_engine::gifts::GiftAssessmentService;
use gifts_engine::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryAttemptRepository::default());
    let assessment_service = Arc::new(GiftAssessmentService::with_default_language(
        repository,
        config.assessment.default_language.clone(),
    ));

    let app = with_gift_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_language = %config.assessment.default_language,
        "spiritual gifts service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
