use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use delivery_pricing::config::{Config, StoreBackend};
use delivery_pricing::pricing::{InMemoryPricingStore, PgPricingStore, PricingService, PricingStore};
use delivery_pricing::{db, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("delivery_pricing=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let store: Arc<dyn PricingStore> = match config.store {
        StoreBackend::Postgres => {
            let pool = db::connect(&config)
                .await
                .context("unable to connect to the database")?;
            db::ensure_schema(&pool).await.context("unable to create schema")?;
            Arc::new(PgPricingStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("Using in-memory pricing store");
            Arc::new(InMemoryPricingStore::new())
        }
    };

    let state = AppState {
        pricing: PricingService::new(store),
    };

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("unable to bind {addr}"))?;
    info!("Server is running on {}", addr);

    axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
