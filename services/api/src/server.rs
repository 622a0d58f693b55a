use crate::cli::ServeArgs;
use crate::infra::{load_store, AppState};
use crate::routes::with_finder_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use college_finder::admissions::{CollegeFinderService, RankingEngine};
use college_finder::config::AppConfig;
use college_finder::error::AppError;
use college_finder::telemetry;
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
    if let Some(catalog) = args.catalog.take() {
        config.finder.catalog_path = Some(catalog);
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = load_store(config.finder.catalog_path.as_deref())?;
    let offerings = store.len();
    let service = Arc::new(CollegeFinderService::new(
        Arc::new(store),
        RankingEngine::new(config.finder.window),
    ));

    let app = with_finder_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        offerings,
        margin = config.finder.window.margin,
        lower_bound = ?config.finder.window.lower_bound,
        "college finder ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
