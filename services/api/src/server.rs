use crate::cli::ServeArgs;
use crate::infra::{default_evaluation_config, AppState, InMemoryLendingRepository};
use crate::routes::with_lending_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_approval::config::AppConfig;
use credit_approval::error::AppError;
use credit_approval::lending::{ingest, LendingService};
use credit_approval::telemetry;
use std::fs::File;
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

    let repository = Arc::new(InMemoryLendingRepository::default());
    let service = Arc::new(LendingService::new(
        repository,
        default_evaluation_config(),
    ));

    preload(&service, &args)?;

    let app = with_lending_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit approval service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Load the optional worksheet exports before the listener opens, so the
/// first request already sees the seeded records.
fn preload(
    service: &LendingService<InMemoryLendingRepository>,
    args: &ServeArgs,
) -> Result<(), AppError> {
    let customers = match &args.customers_csv {
        Some(path) => ingest::customers_from_reader(File::open(path)?)?,
        None => Vec::new(),
    };
    let loans = match &args.loans_csv {
        Some(path) => ingest::loans_from_reader(File::open(path)?)?,
        None => Vec::new(),
    };

    if customers.is_empty() && loans.is_empty() {
        return Ok(());
    }

    let summary = service.seed(customers, loans)?;
    info!(
        customers = summary.customers,
        loans = summary.loans,
        skipped_customers = summary.skipped_customers,
        skipped_loans = summary.skipped_loans,
        "seed data loaded"
    );
    Ok(())
}
