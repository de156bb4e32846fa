use crate::cli::ServeArgs;
use crate::infra::{
    load_catalog, recommendation_config, AppState, InMemoryAnalysisRepository, InMemoryCatalog,
};
use crate::routes::with_skin_analysis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use glowcart::config::AppConfig;
use glowcart::error::AppError;
use glowcart::telemetry;
use glowcart::workflows::skin_quiz::SkinAnalysisService;
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
    let recommendations = recommendation_config(config.recommendations.limit);
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        recommendations: recommendations.clone(),
    };

    let catalog = InMemoryCatalog::with_items(load_catalog(
        config.recommendations.catalog_csv.as_deref(),
    )?);
    info!(
        products = catalog.len(),
        source = ?config.recommendations.catalog_csv,
        "catalog loaded"
    );

    let service = Arc::new(SkinAnalysisService::new(
        Arc::new(InMemoryAnalysisRepository::default()),
        Arc::new(catalog),
        recommendations,
    ));

    let app = with_skin_analysis_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "skin quiz service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
