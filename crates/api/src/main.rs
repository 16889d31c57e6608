use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

use gis_kb_api::jobs::{JobScheduler, KeepAliveJob, PoolMetricsJob};
use gis_kb_api::{app, config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics();

    info!(
        "Starting GIS Knowledge Base API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let pool = persistence::db::create_pool(&config.pool_settings()).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // Idempotent content seed (admin account, taxonomy, starter articles)
    services::bootstrap::seed(&pool, &config.bootstrap).await?;

    let mut scheduler = JobScheduler::new();
    scheduler.register(PoolMetricsJob::new(pool.clone()));
    if !config.server.public_url.is_empty() {
        scheduler.register(KeepAliveJob::new(config.server.public_url.clone())?);
    }
    scheduler.start();

    let addr = config.socket_addr();
    let app = app::create_app(config, pool);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
