//! Retry-and-proxy controller.
//!
//! The `ProxyController` is the main entry point: it forwards one inbound
//! request to the upstream with bounded retries and, when every attempt
//! fails at the transport level, answers with a synthetic payload instead.

use crate::outcome::{ProxyOutcome, ProxyResponse, SyntheticFallback};
use crate::retry::RetryPolicy;
use gq_synthetic::FallbackResolver;
use gq_upstream::{RequestMethod, Transport, UpstreamConfig, UpstreamRequest};
use serde_json::Value;

/// An inbound request for a logical resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub method: RequestMethod,
    /// Resource path segments, e.g. `["ecosystems", "ethereum"]`.
    pub segments: Vec<String>,
    /// Raw inbound body.
    pub body: Option<Vec<u8>>,
    /// Raw `Authorization` header value.
    pub authorization: Option<String>,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
}

impl ProxyRequest {
    /// Create a request with no body, credentials or query.
    pub fn new<I, S>(method: RequestMethod, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
            authorization: None,
            query: None,
        }
    }

    /// Shorthand for a GET on a slash-separated path.
    ///
    /// ```rust
    /// use gq_proxy::ProxyRequest;
    ///
    /// let req = ProxyRequest::get("ecosystems/solana");
    /// assert_eq!(req.segments, vec!["ecosystems", "solana"]);
    /// assert_eq!(req.resource_path(), "ecosystems/solana");
    /// ```
    pub fn get(path: &str) -> Self {
        Self::new(
            RequestMethod::Get,
            path.split('/').filter(|s| !s.is_empty()),
        )
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_authorization(mut self, authorization: impl Into<String>) -> Self {
        self.authorization = Some(authorization.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Segments joined with `/`.
    pub fn resource_path(&self) -> String {
        self.segments.join("/")
    }

    /// Body to forward: only for mutating verbs, only if it parses as JSON.
    pub fn forwarded_body(&self) -> Option<Value> {
        if !self.method.is_mutating() {
            return None;
        }
        let raw = self.body.as_deref()?;
        match serde_json::from_slice(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Dropping non-JSON request body ({} bytes): {}", raw.len(), e);
                None
            }
        }
    }
}

/// Forwards requests upstream with retries; falls back to synthetic data.
///
/// # Example
///
/// ```rust
/// use gq_proxy::{ProxyController, ProxyRequest, RetryPolicy};
/// use gq_upstream::{MockTransport, UpstreamConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let transport = MockTransport::always_fail("connection refused");
///     let controller = ProxyController::new(transport, UpstreamConfig::default())
///         .with_retry_policy(RetryPolicy::default().without_delay());
///
///     let response = controller.handle(ProxyRequest::get("whales")).await;
///     assert_eq!(response.status, 200);
///     assert_eq!(response.json().unwrap()["source"], "synthetic");
/// }
/// ```
#[derive(Debug)]
pub struct ProxyController<T> {
    transport: T,
    config: UpstreamConfig,
    policy: RetryPolicy,
    resolver: FallbackResolver,
}

impl<T: Transport> ProxyController<T> {
    /// Create a controller with the default retry policy.
    pub fn new(transport: T, config: UpstreamConfig) -> Self {
        Self {
            transport,
            config,
            policy: RetryPolicy::default(),
            resolver: FallbackResolver::new(),
        }
    }

    /// Override the retry policy (builder pattern).
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle a request end to end. Never fails.
    pub async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        self.execute(request).await.into_response()
    }

    /// Run the retry loop and report what happened.
    pub async fn execute(&self, request: ProxyRequest) -> ProxyOutcome {
        let path = request.resource_path();
        let max_attempts = self.policy.max_attempts();

        let upstream_request = self
            .config
            .resource_url(&path, request.query.as_deref())
            .map(|url| {
                UpstreamRequest::new(request.method, url)
                    .with_body(request.forwarded_body())
                    .with_authorization(request.authorization.clone())
            });

        let mut last_error = None;

        for attempt in 1..=max_attempts {
            let result = match &upstream_request {
                Ok(req) => self.transport.send(req.clone()).await,
                Err(e) => Err(e.clone()),
            };

            match result {
                Ok(response) => {
                    tracing::debug!(
                        "{} /{} answered {} on attempt {}",
                        request.method,
                        path,
                        response.status,
                        attempt
                    );
                    return ProxyOutcome::Upstream(response);
                }
                Err(e) => {
                    tracing::warn!(
                        "Upstream attempt {}/{} for /{} failed: {}",
                        attempt,
                        max_attempts,
                        path,
                        e
                    );
                    last_error = Some(e);

                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.delay_after(attempt)).await;
                    }
                }
            }
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "upstream unavailable".to_string());

        tracing::error!(
            "Upstream exhausted after {} attempts for /{}; serving synthetic data: {}",
            max_attempts,
            path,
            reason
        );

        ProxyOutcome::Fallback(SyntheticFallback {
            payload: self.resolver.resolve(&path),
            reason,
            attempts: max_attempts,
        })
    }
}
