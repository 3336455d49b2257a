//! # gq-client
//!
//! Polling hooks for dashboard consumers of the GQ-Core proxy.
//!
//! Each hook fetches `{proxy}/api/gq-core/{endpoint}` on an interval and
//! keeps the latest [`GqCoreResponse`](gq_types::GqCoreResponse). A hook
//! never returns an error: when the proxy itself cannot be reached the
//! stored envelope is synthetic with `error: true` and an empty payload.
//!
//! ```rust,no_run
//! use gq_client::GqCoreClient;
//! use gq_upstream::HttpTransport;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GqCoreClient::new(HttpTransport::new(), "http://localhost:3000")?;
//!     let status = client.system_status();
//!
//!     // Polls every 5 s until `handle` is dropped.
//!     let handle = status.mount();
//!     tokio::time::sleep(std::time::Duration::from_secs(12)).await;
//!
//!     if let Some(data) = status.data().await {
//!         println!("{} ({})", data.data.status, data.source);
//!     }
//!     handle.unmount();
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod hook;

pub use client::{intervals, GqCoreClient, PROXY_PREFIX};
pub use error::ClientError;
pub use hook::{GqCoreHook, HookState, PollHandle, MIN_REFRESH_INTERVAL};
