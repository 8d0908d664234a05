use crate::cli::ServeArgs;
use crate::infra::{seed_catalog, AppState};
use crate::routes::with_advisor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use machine_advisor::advisor::AdvisorService;
use machine_advisor::config::AppConfig;
use machine_advisor::engine::ComparisonEngine;
use machine_advisor::error::AppError;
use machine_advisor::telemetry::{self, LogTarget};
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

    telemetry::init(&config.telemetry, LogTarget::Service)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = seed_catalog(&config.advisor)?;
    let engine = ComparisonEngine::new(config.advisor.top_n);
    let shortlist = engine.top_n();
    let advisor_service = Arc::new(AdvisorService::new(Arc::new(catalog.clone()), engine));

    let app = with_advisor_routes(advisor_service, catalog)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, shortlist, "machine advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
