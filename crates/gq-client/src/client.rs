//! Hook factory.
//!
//! [`GqCoreClient`] knows where the proxy lives and hands out one
//! [`GqCoreHook`] per resource, each with its own default polling interval.

use crate::error::ClientError;
use crate::hook::GqCoreHook;
use gq_types::{
    AnomaliesPayload, EcosystemDetailPayload, EcosystemsPayload, EntitiesPayload, HealthPayload,
    MapPayload, NarrativesPayload, OverviewPayload, RingsPayload, RiskPayload,
    SystemStatusPayload, TrendsPayload, WhalesPayload,
};
use gq_upstream::{Transport, TransportError};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Path the proxy serves resources under.
pub const PROXY_PREFIX: &str = "api/gq-core";

/// Default refresh intervals per resource.
pub mod intervals {
    use std::time::Duration;

    pub const OVERVIEW: Duration = Duration::from_millis(30_000);
    pub const RISK: Duration = Duration::from_millis(30_000);
    pub const WHALES: Duration = Duration::from_millis(15_000);
    pub const TRENDS: Duration = Duration::from_millis(30_000);
    pub const MAP: Duration = Duration::from_millis(30_000);
    pub const ANOMALIES: Duration = Duration::from_millis(15_000);
    pub const ENTITIES: Duration = Duration::from_millis(30_000);
    pub const NARRATIVES: Duration = Duration::from_millis(30_000);
    pub const RINGS: Duration = Duration::from_millis(30_000);
    pub const SYSTEM_STATUS: Duration = Duration::from_millis(5_000);
    pub const HEALTH: Duration = Duration::from_millis(10_000);
    pub const ECOSYSTEMS: Duration = Duration::from_millis(30_000);
    pub const ECOSYSTEM: Duration = Duration::from_millis(30_000);
}

/// Creates polling hooks against a proxy.
///
/// # Example
///
/// ```rust
/// use gq_client::GqCoreClient;
/// use gq_upstream::MockTransport;
///
/// #[tokio::main]
/// async fn main() {
///     let client = GqCoreClient::new(
///         MockTransport::always_fail("offline"),
///         "http://localhost:3000",
///     )
///     .unwrap();
///
///     let whales = client.whales();
///     whales.refresh().await;
///
///     let data = whales.data().await.unwrap();
///     assert!(data.is_synthetic());
///     assert_eq!(data.error, Some(true));
/// }
/// ```
pub struct GqCoreClient<T> {
    transport: Arc<T>,
    base_url: Url,
}

impl<T> Clone for GqCoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
        }
    }
}

impl<T: Transport + 'static> GqCoreClient<T> {
    /// Create a client for the proxy at `proxy_base` (e.g. `http://localhost:3000`).
    pub fn new(transport: T, proxy_base: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(proxy_base.trim_end_matches('/'))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(format!(
                "unsupported scheme {}",
                base_url.scheme()
            )));
        }

        Ok(Self {
            transport: Arc::new(transport),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a resource on the proxy.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!(
            "{}/{}/{}",
            base,
            PROXY_PREFIX,
            endpoint.trim_matches('/')
        ))
    }

    /// Generic hook for any endpoint.
    pub fn hook<P>(&self, endpoint: &str, interval: Duration) -> GqCoreHook<T, P>
    where
        P: DeserializeOwned + Default + Clone + Send + Sync + 'static,
    {
        let endpoint = endpoint.trim_matches('/').to_string();
        let target = self
            .endpoint_url(&endpoint)
            .map_err(TransportError::from);

        GqCoreHook::new(Arc::clone(&self.transport), endpoint, target, interval)
    }

    pub fn overview(&self) -> GqCoreHook<T, OverviewPayload> {
        self.hook("overview", intervals::OVERVIEW)
    }

    pub fn risk(&self) -> GqCoreHook<T, RiskPayload> {
        self.hook("risk", intervals::RISK)
    }

    pub fn whales(&self) -> GqCoreHook<T, WhalesPayload> {
        self.hook("whales", intervals::WHALES)
    }

    pub fn trends(&self) -> GqCoreHook<T, TrendsPayload> {
        self.hook("trends", intervals::TRENDS)
    }

    pub fn map(&self) -> GqCoreHook<T, MapPayload> {
        self.hook("map", intervals::MAP)
    }

    pub fn anomalies(&self) -> GqCoreHook<T, AnomaliesPayload> {
        self.hook("anomalies", intervals::ANOMALIES)
    }

    pub fn entities(&self) -> GqCoreHook<T, EntitiesPayload> {
        self.hook("entities", intervals::ENTITIES)
    }

    pub fn narratives(&self) -> GqCoreHook<T, NarrativesPayload> {
        self.hook("narratives", intervals::NARRATIVES)
    }

    pub fn rings(&self) -> GqCoreHook<T, RingsPayload> {
        self.hook("rings", intervals::RINGS)
    }

    pub fn system_status(&self) -> GqCoreHook<T, SystemStatusPayload> {
        self.hook("system-status", intervals::SYSTEM_STATUS)
    }

    pub fn health(&self) -> GqCoreHook<T, HealthPayload> {
        self.hook("health", intervals::HEALTH)
    }

    pub fn ecosystems(&self) -> GqCoreHook<T, EcosystemsPayload> {
        self.hook("ecosystems", intervals::ECOSYSTEMS)
    }

    /// Detail view for one chain, e.g. `ecosystem("ethereum")`.
    pub fn ecosystem(&self, chain: &str) -> GqCoreHook<T, EcosystemDetailPayload> {
        self.hook(&format!("ecosystems/{}", chain), intervals::ECOSYSTEM)
    }
}
