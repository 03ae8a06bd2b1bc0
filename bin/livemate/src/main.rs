//! # LiveMate Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::sync::Arc;

use anyhow::Context;
use lm_api::{AppState, HttpOptions};
use lm_config::{LogFormat, Settings};
use lm_core::{BoardService, PostStore};
use lm_token_sha256::Sha256TokenService;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[cfg(not(any(feature = "db-sqlite", feature = "db-memory")))]
compile_error!("enable one post store feature: `db-sqlite` or `db-memory`");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    init_tracing(&settings);

    // 1. Initialize the post store
    let store = open_store(&settings).await?;

    // 2. Wire the service (explicit dependencies, no globals)
    let service = BoardService::new(store, Arc::new(Sha256TokenService::new()));
    let options = HttpOptions {
        allowed_origins: settings.cors.allowed_origins.clone(),
        body_limit_bytes: settings.server.body_limit_bytes,
    };
    let state = AppState::new(service).with_site_url(&settings.server.public_url);
    let app = lm_api::router(state, &options);

    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("🚀 LiveMate starting on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down cleanly");
    Ok(())
}

#[cfg(feature = "db-sqlite")]
async fn open_store(settings: &Settings) -> anyhow::Result<Arc<dyn PostStore>> {
    let store = lm_db_sqlite::SqlitePostStore::new(&settings.database.url, settings.database.max_connections)
        .await
        .context("failed to init SQLite")?;
    Ok(Arc::new(store))
}

#[cfg(all(feature = "db-memory", not(feature = "db-sqlite")))]
async fn open_store(_settings: &Settings) -> anyhow::Result<Arc<dyn PostStore>> {
    tracing::warn!("using in-memory post store; posts are lost on restart");
    Ok(Arc::new(lm_db_memory::MemoryPostStore::new()))
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match settings.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Plain => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
