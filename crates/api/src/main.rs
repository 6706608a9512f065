use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

use minca_intake_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics()?;

    info!("Starting Minca Mágica intake API v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool
    let pool = persistence::db::create_pool(&config.database.to_pool_config()).await?;

    if config.database.provision_on_startup {
        info!("Provisioning database schema...");
        persistence::schema::provision(&pool).await?;
        info!("Schema provisioned");
    }

    // Pool gauges are sampled on a fixed interval
    let metrics_pool = pool.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(10));
        loop {
            ticker.tick().await;
            persistence::metrics::record_pool_metrics(&metrics_pool);
        }
    });

    if config.email.enabled && config.email.notification_recipients.is_empty() {
        warn!("Email notifications enabled but no recipients configured");
    }

    // Build application
    let app = app::create_app(config.clone(), pool);

    // Start server
    let addr = config.socket_addr()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
