//! # gq-upstream
//!
//! Transport layer between the proxy and the upstream intelligence API.
//!
//! This crate provides a [`Transport`] trait abstraction over the HTTP
//! client so the retry logic in `gq-proxy` and the polling hooks in
//! `gq-client` can be exercised without a network.
//!
//! ## Design Principles
//!
//! - **Zero-cost async**: Uses native async traits (Rust 1.75+), avoiding
//!   the heap allocations that `async_trait` would require.
//!
//! - **Dumb pipe**: A transport sends one request and reports what came
//!   back. Any HTTP status is a successful send; only failures to get a
//!   response at all (DNS, refused connection, timeout, broken body) are
//!   errors. Retry policy lives with the caller.
//!
//! - **Testable**: The [`MockTransport`] implementation replays scripted
//!   replies and counts calls.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gq_upstream::{HttpTransport, RequestMethod, Transport, UpstreamRequest};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new();
//!     let url = Url::parse("http://localhost:8000/gq-core/whales")?;
//!
//!     let response = transport
//!         .send(UpstreamRequest::new(RequestMethod::Get, url))
//!         .await?;
//!
//!     println!("upstream answered {}", response.status);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod http;
mod mock;

pub use config::UpstreamConfig;
pub use error::{ConfigError, TransportError};
pub use http::HttpTransport;
pub use mock::{MockReply, MockTransport};

use serde_json::Value;
use std::fmt;
use url::Url;

/// HTTP verbs the proxy forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    /// Verbs that may carry a JSON body.
    #[inline]
    pub fn is_mutating(&self) -> bool {
        !matches!(self, RequestMethod::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: RequestMethod,
    pub url: Url,
    /// JSON body, only sent for mutating verbs.
    pub body: Option<Value>,
    /// Raw `Authorization` header value.
    pub authorization: Option<String>,
}

impl UpstreamRequest {
    /// Create a request with no body and no credentials.
    pub fn new(method: RequestMethod, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            authorization: None,
        }
    }

    /// Attach a JSON body (builder pattern).
    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Attach an `Authorization` header value (builder pattern).
    pub fn with_authorization(mut self, authorization: Option<String>) -> Self {
        self.authorization = authorization;
        self
    }
}

/// Whatever the upstream answered, verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// Build a JSON response (mostly useful in tests).
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }

    /// Build a plain-text response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            body: body.into().into_bytes(),
        }
    }

    /// Returns true for 2xx statuses.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON, if it is JSON.
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// The body as (lossy) UTF-8 text.
    pub fn text_body(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Abstraction over "send one HTTP request".
///
/// This trait uses native async syntax (Rust 1.75+) rather than
/// `async_trait` to avoid heap allocations from `Box<dyn Future>`.
///
/// ## Implementors
///
/// - [`HttpTransport`]: Production implementation using reqwest
/// - [`MockTransport`]: Test implementation with scripted replies
///
/// ## Why `Send + Sync`?
///
/// Transports are shared across request handlers (stored in `Arc`) and
/// across spawned polling tasks.
pub trait Transport: Send + Sync {
    /// Send the request and return the upstream's answer.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only when no response could be obtained.
    /// Non-2xx statuses are returned as `Ok`.
    fn send(
        &self,
        request: UpstreamRequest,
    ) -> impl std::future::Future<Output = Result<UpstreamResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        request: UpstreamRequest,
    ) -> impl std::future::Future<Output = Result<UpstreamResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mutating_methods() {
        assert!(!RequestMethod::Get.is_mutating());
        assert!(RequestMethod::Post.is_mutating());
        assert!(RequestMethod::Put.is_mutating());
        assert!(RequestMethod::Delete.is_mutating());
    }

    #[test]
    fn test_response_helpers() {
        let ok = UpstreamResponse::json(200, &json!({"a": 1}));
        assert!(ok.is_success());
        assert_eq!(ok.json_body(), Some(json!({"a": 1})));

        let down = UpstreamResponse::text(503, "Service Unavailable");
        assert!(!down.is_success());
        assert_eq!(down.json_body(), None);
        assert_eq!(down.text_body(), "Service Unavailable");
    }
}
