use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_compatibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use coparent_match::config::AppConfig;
use coparent_match::error::AppError;
use coparent_match::matching::{
    load_profiles_from_path, CompatibilityService, InMemoryProfileDirectory,
};
use coparent_match::telemetry;
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
    if let Some(profiles) = args.profiles.take() {
        config.directory.seed_path = Some(profiles);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryProfileDirectory::new());
    if let Some(seed_path) = config.directory.seed_path.as_ref() {
        load_profiles_from_path(directory.as_ref(), seed_path)?;
    }
    let compatibility_service = Arc::new(CompatibilityService::new(directory));

    let app = with_compatibility_routes(compatibility_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "compatibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
