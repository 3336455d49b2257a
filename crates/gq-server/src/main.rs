//! gq-server: Main binary for the GQ-Core resiliency proxy.
//!
//! This binary wires together all crates and starts the HTTP server.

use gq_api::{create_router, AppState};
use gq_proxy::ProxyController;
use gq_synthetic::{EngineCache, SignalFusion, DEFAULT_ENGINE_CACHE_TTL};
use gq_upstream::{HttpTransport, UpstreamConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default port for the server.
const DEFAULT_PORT: u16 = 3000;

/// Default host for the server.
const DEFAULT_HOST: &str = "0.0.0.0";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gq_server=info,gq_api=info,gq_proxy=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse configuration from environment
    let upstream = UpstreamConfig::from_env()?;
    let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let cache_ttl = std::env::var("ENGINE_CACHE_TTL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_ENGINE_CACHE_TTL);

    tracing::info!(
        "Starting gq-server on {}:{} (upstream: {}, engine cache ttl: {:?})",
        host,
        port,
        upstream.base_url(),
        cache_ttl
    );

    // Create app state
    let controller = ProxyController::new(HttpTransport::new(), upstream);
    let fusion = SignalFusion::new(Arc::new(EngineCache::new(cache_ttl)));
    let state = Arc::new(AppState::new(controller, fusion));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                - Health check");
    tracing::info!("  ANY  /api/gq-core/*path     - Proxy with synthetic fallback");
    tracing::info!("  GET  /api/fusion/:entity    - Fused engine score");

    axum::serve(listener, app).await?;

    Ok(())
}
