//! Mock transport for testing.
//!
//! `MockTransport` implements [`Transport`] by replaying scripted replies,
//! so retry and fallback behaviour can be tested without network calls.
//!
//! # Usage
//!
//! ```rust
//! use gq_upstream::{MockReply, MockTransport};
//!
//! // First call answers 503, every later call fails at the network level.
//! let mock = MockTransport::new()
//!     .with_default(MockReply::fail("connection refused"))
//!     .then(MockReply::text(503, "Service Unavailable"));
//! ```

use crate::{error::TransportError, Transport, UpstreamRequest, UpstreamResponse};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Answer with this response.
    Respond(UpstreamResponse),
    /// Fail at the transport level.
    Fail(TransportError),
}

impl MockReply {
    pub fn json(status: u16, body: Value) -> Self {
        MockReply::Respond(UpstreamResponse::json(status, &body))
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        MockReply::Respond(UpstreamResponse::text(status, body))
    }

    pub fn fail(message: impl Into<String>) -> Self {
        MockReply::Fail(TransportError::Network(message.into()))
    }
}

#[derive(Debug)]
struct MockState {
    script: Mutex<VecDeque<MockReply>>,
    default: MockReply,
    calls: AtomicUsize,
    requests: Mutex<Vec<UpstreamRequest>>,
}

/// Mock transport for testing.
///
/// Replies are taken from the script in order; once it is exhausted every
/// call gets the default reply. Clones share the same script and counters,
/// so a test can keep a handle after giving one to the code under test.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a mock whose default is a network failure.
    pub fn new() -> Self {
        Self::from_parts(VecDeque::new(), MockReply::fail("mock transport not configured"))
    }

    /// Mock that fails every call with `message`.
    pub fn always_fail(message: impl Into<String>) -> Self {
        Self::new().with_default(MockReply::fail(message))
    }

    /// Mock that answers every call with the given JSON.
    pub fn always_json(status: u16, body: Value) -> Self {
        Self::new().with_default(MockReply::json(status, body))
    }

    /// Replace the reply used once the script runs out (builder pattern).
    pub fn with_default(self, reply: MockReply) -> Self {
        let script = self.take_script();
        Self::from_parts(script, reply)
    }

    /// Append a reply to the script (builder pattern).
    pub fn then(self, reply: MockReply) -> Self {
        if let Ok(mut script) = self.state.script.lock() {
            script.push_back(reply);
        }
        self
    }

    /// Number of `send` calls so far.
    pub fn call_count(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.state
            .requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn from_parts(script: VecDeque<MockReply>, default: MockReply) -> Self {
        Self {
            state: Arc::new(MockState {
                script: Mutex::new(script),
                default,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    fn take_script(&self) -> VecDeque<MockReply> {
        self.state
            .script
            .lock()
            .map(|mut s| std::mem::take(&mut *s))
            .unwrap_or_default()
    }

    fn next_reply(&self) -> MockReply {
        self.state
            .script
            .lock()
            .ok()
            .and_then(|mut s| s.pop_front())
            .unwrap_or_else(|| self.state.default.clone())
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.state.requests.lock() {
            requests.push(request);
        }

        match self.next_reply() {
            MockReply::Respond(response) => Ok(response),
            MockReply::Fail(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestMethod;
    use serde_json::json;
    use url::Url;

    fn get(path: &str) -> UpstreamRequest {
        let url = Url::parse(&format!("http://mock/gq-core/{}", path)).unwrap();
        UpstreamRequest::new(RequestMethod::Get, url)
    }

    #[tokio::test]
    async fn test_unconfigured_mock_fails() {
        let mock = MockTransport::new();
        assert!(mock.send(get("whales")).await.is_err());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_script_then_default() {
        let mock = MockTransport::always_json(200, json!({"ok": true}))
            .then(MockReply::text(503, "down"));

        let first = mock.send(get("risk")).await.unwrap();
        assert_eq!(first.status, 503);

        let second = mock.send(get("risk")).await.unwrap();
        assert_eq!(second.status, 200);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_with_default_keeps_script() {
        let mock = MockTransport::new()
            .then(MockReply::text(404, "missing"))
            .with_default(MockReply::fail("abort"));

        assert_eq!(mock.send(get("a")).await.unwrap().status, 404);
        assert_eq!(
            mock.send(get("a")).await.unwrap_err(),
            TransportError::Network("abort".into())
        );
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let mock = MockTransport::always_fail("refused");
        let handle = mock.clone();
        let _ = mock.send(get("whales")).await;
        assert_eq!(handle.call_count(), 1);
        assert_eq!(handle.requests()[0].url.path(), "/gq-core/whales");
    }
}
