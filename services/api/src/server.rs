use crate::cli::ServeArgs;
use crate::infra::{directory_audit_service, AppState};
use crate::routes::with_audit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use degree_audit::config::AppConfig;
use degree_audit::error::AppError;
use degree_audit::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_dir) = args.data_dir.take() {
        config.data.root = data_dir;
    }

    telemetry::init(&config.telemetry)?;

    if !config.data.root.is_dir() {
        warn!(
            data_dir = %config.data.root.display(),
            "data directory not found; audits will fail until it exists"
        );
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let audit_service = Arc::new(directory_audit_service(config.data.root.clone()));

    let app = with_audit_routes(audit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data_dir = %config.data.root.display(),
        "degree audit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
