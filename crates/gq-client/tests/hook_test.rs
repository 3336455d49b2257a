//! Polling behaviour of client hooks.

use gq_client::GqCoreClient;
use gq_types::{GqCoreResponse, RiskPayload, Source, WhalesPayload};
use gq_upstream::{
    MockReply, MockTransport, Transport, TransportError, UpstreamRequest, UpstreamResponse,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const PROXY: &str = "http://localhost:3000";

/// Transport that takes a while before failing.
#[derive(Clone, Default)]
struct SlowTransport {
    delay: Duration,
    started: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
}

impl Transport for SlowTransport {
    async fn send(&self, _request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::Network("too slow".into()))
    }
}

#[tokio::test]
async fn test_refresh_stores_real_envelope() {
    let body = json!({
        "source": "real",
        "timestamp": "2026-01-10T00:00:00.000Z",
        "top_risks": [],
        "total_tokens": 42,
        "average_risk": 55.5
    });
    let mock = MockTransport::always_json(200, body);
    let client = GqCoreClient::new(mock.clone(), PROXY).unwrap();

    let hook = client.risk();
    assert!(hook.data().await.is_none());

    hook.refresh().await;
    let state = hook.state().await;
    let data = state.data.unwrap();

    assert!(!state.loading);
    assert_eq!(data.source, Source::Real);
    assert_eq!(data.data.total_tokens, 42);
    assert_eq!(data.error, None);
    assert_eq!(
        mock.requests()[0].url.as_str(),
        "http://localhost:3000/api/gq-core/risk"
    );
}

#[tokio::test]
async fn test_proxy_synthetic_envelope_is_kept() {
    let envelope = GqCoreResponse::synthetic(WhalesPayload::default(), "network error: x", 2);
    let mock = MockTransport::always_json(200, serde_json::to_value(&envelope).unwrap());
    let client = GqCoreClient::new(mock, PROXY).unwrap();

    let hook = client.whales();
    hook.refresh().await;
    let data = hook.data().await.unwrap();

    assert!(data.is_synthetic());
    assert_eq!(data.retry_count, Some(2));
    assert_eq!(data.error, None);
}

#[tokio::test]
async fn test_failures_become_error_envelopes() {
    let mock = MockTransport::new()
        .then(MockReply::fail("connection refused"))
        .then(MockReply::text(502, "Bad Gateway"))
        .then(MockReply::json(200, json!({"unexpected": true})));
    let client = GqCoreClient::new(mock, PROXY).unwrap();
    let hook = client.risk();

    let mut reasons = Vec::new();
    for _ in 0..3 {
        hook.refresh().await;
        let state = hook.state().await;
        assert!(!state.loading);

        let data = state.data.unwrap();
        assert_eq!(data.source, Source::Synthetic);
        assert_eq!(data.error, Some(true));
        assert_eq!(data.data, RiskPayload::default());
        reasons.push(data.fallback_reason.unwrap());
    }

    assert_eq!(reasons[0], "network error: connection refused");
    assert_eq!(reasons[1], "HTTP 502");
    assert!(reasons[2].starts_with("decode error"));
}

#[tokio::test(start_paused = true)]
async fn test_system_status_polls_every_five_seconds() {
    let mock = MockTransport::always_fail("offline");
    let client = GqCoreClient::new(mock.clone(), PROXY).unwrap();
    let hook = client.system_status();

    let handle = hook.mount();
    tokio::time::sleep(Duration::from_millis(12_000)).await;

    // Ticks at 0 s, 5 s and 10 s.
    assert_eq!(mock.call_count(), 3);
    assert!(handle.is_mounted());

    let state = hook.state().await;
    assert!(!state.loading);
    let data = state.data.unwrap();
    assert_eq!(data.error, Some(true));
    assert!(data.is_synthetic());

    handle.unmount();
    tokio::time::sleep(Duration::from_millis(20_000)).await;
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_refreshes_are_not_deduplicated() {
    let transport = SlowTransport {
        delay: Duration::from_millis(7_000),
        ..Default::default()
    };
    let client = GqCoreClient::new(transport.clone(), PROXY).unwrap();
    let hook = client.system_status();

    let handle = hook.mount();
    tokio::time::sleep(Duration::from_millis(11_000)).await;

    // Requests at 0 s, 5 s, 10 s; only the first has finished.
    assert_eq!(transport.started.load(Ordering::SeqCst), 3);
    assert_eq!(transport.finished.load(Ordering::SeqCst), 1);
    assert!(hook.data().await.unwrap().error.unwrap());
    // The first completion must not clear the flag while two are running.
    assert!(hook.loading().await);

    drop(handle);
    tokio::time::sleep(Duration::from_millis(30_000)).await;

    assert_eq!(transport.finished.load(Ordering::SeqCst), 3);
    assert!(!hook.loading().await);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_discards_in_flight_result() {
    let transport = SlowTransport {
        delay: Duration::from_millis(3_000),
        ..Default::default()
    };
    let client = GqCoreClient::new(transport.clone(), PROXY).unwrap();
    let hook = client.whales();

    let handle = hook.mount();
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert!(hook.loading().await);
    drop(handle);

    tokio::time::sleep(Duration::from_millis(30_000)).await;

    assert_eq!(transport.started.load(Ordering::SeqCst), 1);
    assert_eq!(transport.finished.load(Ordering::SeqCst), 1);
    let state = hook.state().await;
    assert!(state.data.is_none());
    assert!(!state.loading);
}
