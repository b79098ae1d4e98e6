mod analysis;
mod config;
mod db;
mod errors;
mod fetcher;
mod llm_client;
mod models;
mod opportunities;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::fetcher::{CachedFetcher, ContentCache, HttpContentFetcher};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Verify API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let model = LlmClient::new(config.google_api_key.clone(), config.model_timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize page fetcher with its content cache
    let cache = ContentCache::new(config.content_cache_capacity, config.content_cache_ttl);
    let fetcher = CachedFetcher::new(HttpContentFetcher::new(config.fetch_timeout)?, cache);
    info!(
        "Content cache: capacity {}, ttl {}s",
        config.content_cache_capacity,
        config.content_cache_ttl.as_secs()
    );

    // Build app state
    let state = AppState {
        db,
        model: Arc::new(model),
        fetcher: Arc::new(fetcher),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
