//! gq-api: HTTP API layer for the GQ-Core resiliency proxy
//!
//! This crate defines the REST API endpoints:
//! - GET /health
//! - GET|POST|PUT|DELETE /api/gq-core/*path
//! - GET /api/fusion/:entity

pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use state::AppState;
pub use types::{FusionQuery, HealthResponse};

use axum::{routing::get, Router};
use gq_upstream::Transport;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router.
pub fn create_router<T: Transport + 'static>(state: Arc<AppState<T>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/gq-core/*path",
            get(handlers::proxy::<T>)
                .post(handlers::proxy::<T>)
                .put(handlers::proxy::<T>)
                .delete(handlers::proxy::<T>),
        )
        .route("/api/fusion/:entity", get(handlers::get_fusion::<T>))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
