//! gq-proxy: Retry-and-proxy controller for the GQ-Core API.
//!
//! This crate provides the [`ProxyController`], which maps an inbound
//! request for a logical resource onto the upstream backend and guarantees
//! a non-error, non-empty answer.
//!
//! # Overview
//!
//! - The upstream is tried up to [`MAX_RETRIES`] times, waiting
//!   `RETRY_DELAY_MS * attempt` between attempts.
//! - Only transport failures are retried. Any HTTP status the upstream
//!   returns, including 4xx/5xx, is passed straight through.
//! - A 2xx JSON object gets `source: "real"` and a `timestamp` when missing.
//! - When every attempt fails the caller gets HTTP 200 with a synthetic
//!   envelope: the generated payload plus `source: "synthetic"`,
//!   `timestamp`, `fallback_reason` and `retry_count`.
//!
//! # Example
//!
//! ```rust,no_run
//! use gq_proxy::{ProxyController, ProxyRequest};
//! use gq_upstream::{HttpTransport, UpstreamConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let controller = ProxyController::new(HttpTransport::new(), UpstreamConfig::from_env()?);
//!
//!     let response = controller.handle(ProxyRequest::get("whales")).await;
//!     println!("{} {:?}", response.status, response.source());
//!     Ok(())
//! }
//! ```

mod controller;
mod outcome;
mod retry;

pub use controller::{ProxyController, ProxyRequest};
pub use outcome::{ProxyBody, ProxyOutcome, ProxyResponse, SyntheticFallback, FALLBACK_STATUS};
pub use retry::{RetryPolicy, MAX_RETRIES, RETRY_DELAY_MS};

// Re-export commonly used types from dependencies for convenience
pub use gq_types::Source;
pub use gq_upstream::{RequestMethod, Transport};
