mod answers;
mod api;
mod backend;
mod challenges;
mod comparison;
mod config;
mod conflict;
mod entity;
mod forge;
mod mentor;
mod notes;
mod queries;
mod session;
mod storage;
mod utils;
mod visualizer;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::load()?;

    let storage = storage::FileStorage::open(&config.data_dir).await?;

    let queries = queries::ChallengeQueries::new();
    let backend = backend::SqliteBackend::new(&config.data_dir)
        .await
        .context("Failed to open challenge backend")?;
    queries.connect(backend).await;

    if let Err(e) = challenges::seed_if_empty(&queries).await {
        warn!("Failed to seed challenges: {}", e);
    }

    let forge_store = forge::ForgeStore::new(&config.data_dir)
        .await
        .context("Failed to open forge store")?;
    let forge_client = match &config.forge_url {
        Some(url) => Some(forge::ForgeClient::new(url, config.forge_api_key.as_deref())),
        None => {
            info!("No forge url configured, code analysis disabled");
            None
        }
    };

    let state = api::AppState::new(&config, storage, queries, forge_store, forge_client);
    let app = api::create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Listening on {}", listener.local_addr()?);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping...");

    state.comparison.reset().await;

    server_handle.abort();
    info!("Shutdown complete");

    Ok(())
}
