//! Application state for the API server.

use gq_proxy::ProxyController;
use gq_synthetic::SignalFusion;

/// Shared application state.
pub struct AppState<T> {
    /// Forwards `/api/gq-core/*` requests upstream.
    pub controller: ProxyController<T>,
    /// Serves `/api/fusion/:entity`.
    pub fusion: SignalFusion,
}

impl<T> AppState<T> {
    /// Create a new application state.
    pub fn new(controller: ProxyController<T>, fusion: SignalFusion) -> Self {
        Self { controller, fusion }
    }
}
