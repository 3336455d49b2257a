//! Polling hook over one resource.
//!
//! A [`GqCoreHook`] owns the latest envelope for an endpoint and refreshes
//! it on a timer once mounted. `refresh` never fails: transport errors,
//! non-2xx answers and undecodable bodies all become a synthetic envelope
//! flagged with `error: true`, so callers never handle errors themselves.
//!
//! Refreshes are not de-duplicated. Every tick starts a new request even if
//! the previous one is still running; whichever finishes last wins, and
//! `loading` stays true until none are left running. Unmounting stops the
//! timer and discards results of requests still in flight; it does not
//! cancel them.

use gq_types::GqCoreResponse;
use gq_upstream::{RequestMethod, Transport, TransportError, UpstreamRequest};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use url::Url;

/// Shortest accepted refresh interval.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Snapshot of a hook's state.
#[derive(Debug, Clone, PartialEq)]
pub struct HookState<P> {
    /// Latest envelope; `None` until the first refresh completes.
    pub data: Option<GqCoreResponse<P>>,
    /// True while any refresh is running.
    pub loading: bool,
}

impl<P> Default for HookState<P> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
        }
    }
}

struct HookInner<T, P> {
    transport: Arc<T>,
    endpoint: String,
    target: Result<Url, TransportError>,
    interval: Duration,
    state: RwLock<HookState<P>>,
    /// Refreshes started but not finished; only touched under `state`'s lock.
    in_flight: AtomicUsize,
    /// Bumped on unmount; a refresh only commits if it is unchanged.
    generation: Arc<AtomicU64>,
}

/// Polling state for one endpoint.
///
/// Cheap to clone; clones share state.
pub struct GqCoreHook<T, P> {
    inner: Arc<HookInner<T, P>>,
}

impl<T, P> Clone for GqCoreHook<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, P> GqCoreHook<T, P>
where
    T: Transport + 'static,
    P: DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(
        transport: Arc<T>,
        endpoint: String,
        target: Result<Url, TransportError>,
        interval: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(HookInner {
                transport,
                endpoint,
                target,
                interval: interval.max(MIN_REFRESH_INTERVAL),
                state: RwLock::new(HookState::default()),
                in_flight: AtomicUsize::new(0),
                generation: Arc::new(AtomicU64::new(0)),
            }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Resolved URL, or `None` if the endpoint did not form a valid one.
    pub fn url(&self) -> Option<&Url> {
        self.inner.target.as_ref().ok()
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Current state snapshot.
    pub async fn state(&self) -> HookState<P> {
        self.inner.state.read().await.clone()
    }

    /// Latest envelope, if any.
    pub async fn data(&self) -> Option<GqCoreResponse<P>> {
        self.inner.state.read().await.data.clone()
    }

    pub async fn loading(&self) -> bool {
        self.inner.state.read().await.loading
    }

    /// Fetch once and store the result. Always completes.
    pub async fn refresh(&self) {
        let generation = self.inner.generation.load(Ordering::SeqCst);

        {
            let mut state = self.inner.state.write().await;
            self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
        }

        let envelope = self.fetch().await;

        let mut state = self.inner.state.write().await;
        let remaining = self.inner.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        state.loading = remaining > 0;

        if self.inner.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding result for unmounted hook {}", self.inner.endpoint);
            return;
        }

        state.data = Some(envelope);
    }

    /// Refresh now, then every `interval` until the handle is dropped.
    pub fn mount(&self) -> PollHandle {
        let hook = self.clone();
        let period = self.inner.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // First tick completes immediately.
                ticker.tick().await;
                let hook = hook.clone();
                tokio::spawn(async move { hook.refresh().await });
            }
        });

        tracing::debug!(
            "Mounted hook {} (every {:?})",
            self.inner.endpoint,
            self.inner.interval
        );

        PollHandle {
            task: Some(task),
            generation: Arc::clone(&self.inner.generation),
        }
    }

    async fn fetch(&self) -> GqCoreResponse<P> {
        let result = match &self.inner.target {
            Ok(url) => {
                let request = UpstreamRequest::new(RequestMethod::Get, url.clone());
                self.inner.transport.send(request).await
            }
            Err(e) => Err(e.clone()),
        };

        let reason = match result {
            Ok(response) if response.is_success() => {
                match serde_json::from_slice::<GqCoreResponse<P>>(&response.body) {
                    Ok(envelope) => return envelope,
                    Err(e) => format!("decode error: {}", e),
                }
            }
            Ok(response) => format!("HTTP {}", response.status),
            Err(e) => e.to_string(),
        };

        tracing::warn!("Hook fetch for {} failed: {}", self.inner.endpoint, reason);
        GqCoreResponse::client_error(P::default(), reason)
    }
}

/// Keeps a mounted hook polling. Dropping it unmounts the hook.
#[derive(Debug)]
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
    generation: Arc<AtomicU64>,
}

impl PollHandle {
    /// Stop polling and discard in-flight results.
    pub fn unmount(mut self) {
        self.stop();
    }

    pub fn is_mounted(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
