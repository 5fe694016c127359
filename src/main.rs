use std::sync::Arc;

use anyhow::Context;
use library_api::config::AppConfig;
use library_api::database::{Database, MemoryStore};
use library_api::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the subscriber so RUST_LOG can come from it too
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::debug!("Ignoring unreadable .env file: {}", e),
    }

    let config = AppConfig::from_env();
    config.validate()?;
    tracing::info!("Starting library API in {:?} mode", config.environment);

    let port = config.api.port;
    let state = if config.database.connection.is_some() {
        let database = Database::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        database.migrate().await.context("failed to migrate schema")?;
        AppState::postgres(config, database)
    } else {
        tracing::warn!("CONNECTION not set; using in-memory storage");
        AppState::in_memory(config, Arc::new(MemoryStore::new()))
    };

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Library API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
