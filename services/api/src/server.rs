use crate::cli::ServeArgs;
use crate::infra::{apply_roster_args, load_table, AppState};
use crate::routes::with_workforce_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::info;
use workforce_dashboard::config::AppConfig;
use workforce_dashboard::error::AppError;
use workforce_dashboard::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    config.roster = apply_roster_args(config.roster, args.roster);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let table = Arc::new(RwLock::new(load_table(&config.roster)?));

    let app = with_workforce_routes(table)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, source = %config.roster.source, "workforce dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
