//! Catalog API server entry point.

use std::net::SocketAddr;

use axum::Router;
use catalog_api::bootstrap::{self, Repositories};
use catalog_api::config::AppConfig;
use catalog_api::error::AppError;
use catalog_store::MIGRATOR;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting Catalog API server");

    let config = AppConfig::from_env()?;

    let repositories = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await?;
            MIGRATOR.run(&pool).await?;
            Repositories::postgres(pool)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory stores");
            Repositories::in_memory()
        }
    };

    let services = bootstrap::build(&config, repositories).await?;

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                let _ = stop_tx.send(true);
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for shutdown signal");
                stop_tx.closed().await;
            }
        }
    });

    let composite_addr = config.socket_addr(config.composite_port)?;
    let product_addr = config.socket_addr(config.product_port)?;
    let recommendation_addr = config.socket_addr(config.recommendation_port)?;
    let review_addr = config.socket_addr(config.review_port)?;

    tokio::try_join!(
        serve("composite", composite_addr, services.composite, stop_rx.clone()),
        serve("product", product_addr, services.product, stop_rx.clone()),
        serve(
            "recommendation",
            recommendation_addr,
            services.recommendation,
            stop_rx.clone(),
        ),
        serve("review", review_addr, services.review, stop_rx),
    )?;

    services.bus.shutdown().await;
    Ok(())
}

async fn serve(
    name: &'static str,
    addr: SocketAddr,
    app: Router,
    mut stop: watch::Receiver<bool>,
) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(service = name, %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = stop.wait_for(|stopped| *stopped).await;
        })
        .await?;

    info!(service = name, "stopped");
    Ok(())
}
