//! Result of a proxied call, and its collapse into a response.
//!
//! The controller never fails. Internally it produces a [`ProxyOutcome`]
//! (either the upstream answered, or we fell back); [`ProxyOutcome::into_response`]
//! turns that into the envelope-shaped [`ProxyResponse`] sent to the browser.

use gq_types::{
    now_iso8601, Source, FALLBACK_REASON_KEY, RETRY_COUNT_KEY, SOURCE_KEY, TIMESTAMP_KEY,
};
use gq_upstream::UpstreamResponse;
use serde_json::{Map, Value};

/// Status of every synthetic response.
pub const FALLBACK_STATUS: u16 = 200;

/// Payload produced after the upstream was unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticFallback {
    /// Generated payload (an object, possibly empty).
    pub payload: Value,
    /// Message of the last transport error.
    pub reason: String,
    /// Attempts made before giving up.
    pub attempts: u32,
}

/// What happened to a proxied request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyOutcome {
    /// The upstream answered (any status).
    Upstream(UpstreamResponse),
    /// Every attempt failed at the transport level.
    Fallback(SyntheticFallback),
}

/// Response body as it leaves the proxy.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyBody {
    Json(Value),
    /// Non-JSON upstream body, forwarded byte for byte.
    Opaque {
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

/// Final response: status plus body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: ProxyBody,
}

impl ProxyResponse {
    /// JSON body, if the response has one.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ProxyBody::Json(v) => Some(v),
            ProxyBody::Opaque { .. } => None,
        }
    }

    /// Provenance flag, when the body is an envelope.
    pub fn source(&self) -> Option<Source> {
        self.json()?
            .get(SOURCE_KEY)?
            .as_str()
            .and_then(|s| s.parse().ok())
    }
}

impl ProxyOutcome {
    /// Returns true if the payload was generated locally.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ProxyOutcome::Fallback(_))
    }

    /// Collapse into the response sent to the caller.
    pub fn into_response(self) -> ProxyResponse {
        match self {
            ProxyOutcome::Upstream(upstream) => passthrough(upstream),
            ProxyOutcome::Fallback(fallback) => ProxyResponse {
                status: FALLBACK_STATUS,
                body: ProxyBody::Json(synthetic_envelope(fallback)),
            },
        }
    }
}

fn is_missing(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).map_or(true, Value::is_null)
}

/// Mirror the upstream status and body. Only a 2xx JSON object is
/// normalized, and only by filling in `source`/`timestamp` when absent.
fn passthrough(upstream: UpstreamResponse) -> ProxyResponse {
    let status = upstream.status;

    let body = match upstream.json_body() {
        Some(Value::Object(mut map)) if upstream.is_success() => {
            if is_missing(&map, SOURCE_KEY) {
                map.insert(SOURCE_KEY.to_string(), Value::from(Source::Real.as_str()));
            }
            if is_missing(&map, TIMESTAMP_KEY) {
                map.insert(TIMESTAMP_KEY.to_string(), Value::from(now_iso8601()));
            }
            ProxyBody::Json(Value::Object(map))
        }
        Some(value) => ProxyBody::Json(value),
        None => ProxyBody::Opaque {
            content_type: upstream.content_type,
            bytes: upstream.body,
        },
    };

    ProxyResponse { status, body }
}

/// `{...payload, source, timestamp, fallback_reason, retry_count}`.
/// Envelope keys win over payload keys of the same name.
fn synthetic_envelope(fallback: SyntheticFallback) -> Value {
    let mut map = match fallback.payload {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    map.insert(SOURCE_KEY.to_string(), Value::from(Source::Synthetic.as_str()));
    map.insert(TIMESTAMP_KEY.to_string(), Value::from(now_iso8601()));
    map.insert(FALLBACK_REASON_KEY.to_string(), Value::from(fallback.reason));
    map.insert(RETRY_COUNT_KEY.to_string(), Value::from(fallback.attempts));

    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_object_gets_source_and_timestamp() {
        let resp = ProxyOutcome::Upstream(UpstreamResponse::json(200, &json!({"top_whales": []})))
            .into_response();
        let body = resp.json().unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(body["source"], "real");
        assert!(body["timestamp"].is_string());
        assert_eq!(body["top_whales"], json!([]));
    }

    #[test]
    fn test_upstream_source_and_timestamp_preserved() {
        let upstream = json!({"source": "synthetic", "timestamp": "2026-01-01T00:00:00Z"});
        let resp = ProxyOutcome::Upstream(UpstreamResponse::json(200, &upstream)).into_response();
        assert_eq!(resp.json(), Some(&upstream));
        assert_eq!(resp.source(), Some(Source::Synthetic));
    }

    #[test]
    fn test_null_source_is_filled() {
        let upstream = json!({"source": null});
        let resp = ProxyOutcome::Upstream(UpstreamResponse::json(201, &upstream)).into_response();
        assert_eq!(resp.json().unwrap()["source"], "real");
    }

    #[test]
    fn test_error_status_json_untouched() {
        let upstream = json!({"detail": "not found"});
        let resp = ProxyOutcome::Upstream(UpstreamResponse::json(404, &upstream)).into_response();
        assert_eq!(resp.status, 404);
        assert_eq!(resp.json(), Some(&upstream));
    }

    #[test]
    fn test_success_array_untouched() {
        let upstream = json!([1, 2, 3]);
        let resp = ProxyOutcome::Upstream(UpstreamResponse::json(200, &upstream)).into_response();
        assert_eq!(resp.json(), Some(&upstream));
    }

    #[test]
    fn test_non_json_is_opaque() {
        let resp = ProxyOutcome::Upstream(UpstreamResponse::text(502, "<html>Bad Gateway</html>"))
            .into_response();
        assert_eq!(resp.status, 502);
        match resp.body {
            ProxyBody::Opaque { bytes, content_type } => {
                assert_eq!(bytes, b"<html>Bad Gateway</html>");
                assert!(content_type.unwrap().starts_with("text/plain"));
            }
            other => panic!("expected opaque body, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_envelope() {
        let outcome = ProxyOutcome::Fallback(SyntheticFallback {
            payload: json!({"top_whales": [{"id": "w"}], "source": "payload-value"}),
            reason: "network error: abort".into(),
            attempts: 2,
        });
        assert!(outcome.is_fallback());

        let resp = outcome.into_response();
        let body = resp.json().unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(body["source"], "synthetic");
        assert_eq!(body["fallback_reason"], "network error: abort");
        assert_eq!(body["retry_count"], 2);
        assert_eq!(body["top_whales"][0]["id"], "w");
    }

    #[test]
    fn test_fallback_with_non_object_payload() {
        let resp = ProxyOutcome::Fallback(SyntheticFallback {
            payload: Value::Null,
            reason: "x".into(),
            attempts: 1,
        })
        .into_response();
        let obj = resp.json().unwrap().as_object().unwrap();
        assert_eq!(obj.len(), 4);
    }
}
