//! Car Insurance Records - API Server Binary
//!
//! Starts the HTTP API and the background expiration scanner.
//!
//! # Usage
//!
//! ```bash
//! API_DATABASE_URL=postgres://localhost/car_insurance API_SEED_DEMO_DATA=true \
//!     cargo run --bin car-insurance-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `API_SEED_DEMO_DATA` - Load the demo owners, cars and policies into an empty database
//! * `API_EXPIRATION_CHECK_INTERVAL_SECS` - Pause between expiration scans (default: 3300)
//! * `API_EXPIRATION_WINDOW_SECS` - Trailing window of each scan (default: 3600)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_policy::ExpirationScanner;
use infra_db::adapters::{PostgresClaimAdapter, PostgresPolicyAdapter, PostgresVehicleAdapter};
use infra_db::{apply_schema, create_pool, seed_demo_data};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting car insurance API server"
    );

    let pool = create_pool(&config.database_config()).await?;
    apply_schema(&pool).await?;

    if config.seed_demo_data {
        let report = seed_demo_data(&pool).await?;
        if report.is_empty() {
            tracing::info!("Database already populated, demo data not loaded");
        } else {
            tracing::info!(
                owners = report.owners,
                cars = report.cars,
                policies = report.policies,
                skipped = report.skipped_vins.len(),
                "Demo data loaded"
            );
        }
    }

    let vehicles = Arc::new(PostgresVehicleAdapter::new(pool.clone()));
    let policies = Arc::new(PostgresPolicyAdapter::new(pool.clone()));
    let claims = Arc::new(PostgresClaimAdapter::new(pool.clone()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scanner = ExpirationScanner::new(policies.clone(), config.scanner_config()?);
    let scanner_task = tokio::spawn(scanner.run(shutdown_rx));

    let app = create_router(AppState::new(vehicles, policies, claims));
    let addr: SocketAddr = config.server_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Stop the scanner even if the server failed
    let _ = shutdown_tx.send(true);
    if let Err(e) = scanner_task.await {
        tracing::error!(error = %e, "Expiration scanner task failed");
    }
    pool.close().await;

    served?;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Installs the tracing subscriber, preferring `RUST_LOG` over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Resolves on Ctrl+C or SIGTERM
///
/// A signal handler that cannot be installed never fires, so the server
/// keeps running rather than shutting down immediately.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
