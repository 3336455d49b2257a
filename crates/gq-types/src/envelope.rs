//! Response envelope and provenance flag.
//!
//! Every response leaving the proxy is an object carrying a [`Source`] flag
//! and a `timestamp`, with the resource payload merged at the top level.
//! [`GqCoreResponse`] is the typed view of that shape, used by the client
//! hooks; the proxy itself works on raw JSON so unknown upstream fields
//! pass through untouched.

use crate::TypeError;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Envelope key holding the provenance flag.
pub const SOURCE_KEY: &str = "source";

/// Envelope key holding the generation time.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Envelope key holding the terminal transport error on synthetic responses.
pub const FALLBACK_REASON_KEY: &str = "fallback_reason";

/// Envelope key holding the number of attempts made on synthetic responses.
pub const RETRY_COUNT_KEY: &str = "retry_count";

/// Envelope key set by client hooks when the fetch itself failed.
pub const ERROR_KEY: &str = "error";

/// Provenance of a response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Passed through from the upstream backend.
    #[default]
    Real,
    /// Generated locally because the upstream was unreachable.
    Synthetic,
}

impl Source {
    /// Wire representation of the flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Real => "real",
            Source::Synthetic => "synthetic",
        }
    }

    /// Returns true for generated payloads.
    #[inline]
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Source::Synthetic)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real" => Ok(Source::Real),
            "synthetic" => Ok(Source::Synthetic),
            other => Err(TypeError::InvalidSource(other.to_string())),
        }
    }
}

/// Current time as an ISO-8601 string with millisecond precision and a `Z`
/// suffix, e.g. `2026-01-10T12:00:00.000Z`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Typed view of a response envelope.
///
/// The payload `T` is flattened, so its fields sit next to `source` and
/// `timestamp` exactly as on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GqCoreResponse<T> {
    /// Provenance flag.
    pub source: Source,

    /// Generation time (ISO-8601).
    pub timestamp: String,

    /// Terminal transport error; only present on synthetic responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,

    /// Attempts made before falling back; only present on synthetic responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,

    /// Set by client hooks when the request could not be completed at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,

    /// Resource payload.
    #[serde(flatten)]
    pub data: T,
}

impl<T> GqCoreResponse<T> {
    /// Wrap a payload as a live response stamped now.
    pub fn real(data: T) -> Self {
        Self {
            source: Source::Real,
            timestamp: now_iso8601(),
            fallback_reason: None,
            retry_count: None,
            error: None,
            data,
        }
    }

    /// Wrap a payload as a synthetic fallback.
    pub fn synthetic(data: T, fallback_reason: impl Into<String>, retry_count: u32) -> Self {
        Self {
            source: Source::Synthetic,
            timestamp: now_iso8601(),
            fallback_reason: Some(fallback_reason.into()),
            retry_count: Some(retry_count),
            error: None,
            data,
        }
    }

    /// Envelope produced client-side when a fetch failed outright.
    pub fn client_error(data: T, reason: impl Into<String>) -> Self {
        Self {
            source: Source::Synthetic,
            timestamp: now_iso8601(),
            fallback_reason: Some(reason.into()),
            retry_count: None,
            error: Some(true),
            data,
        }
    }

    /// Returns true if the payload was generated rather than fetched.
    pub fn is_synthetic(&self) -> bool {
        self.source.is_synthetic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Probe {
        total: u32,
    }

    #[test]
    fn test_source_round_trips_lowercase() {
        assert_eq!(serde_json::to_value(Source::Synthetic).unwrap(), json!("synthetic"));
        assert_eq!("real".parse::<Source>().unwrap(), Source::Real);
        assert!("live".parse::<Source>().is_err());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = now_iso8601();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_payload_is_flattened() {
        let value = serde_json::to_value(GqCoreResponse::real(Probe { total: 3 })).unwrap();
        assert_eq!(value["source"], "real");
        assert_eq!(value["total"], 3);
        assert!(value.get("fallback_reason").is_none());
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_decode_synthetic_envelope() {
        let raw = json!({
            "source": "synthetic",
            "timestamp": "2026-01-10T00:00:00.000Z",
            "fallback_reason": "network error: connection refused",
            "retry_count": 2,
            "total": 7
        });
        let env: GqCoreResponse<Probe> = serde_json::from_value(raw).unwrap();
        assert!(env.is_synthetic());
        assert_eq!(env.retry_count, Some(2));
        assert_eq!(env.data, Probe { total: 7 });
    }

    #[test]
    fn test_client_error_sets_flag() {
        let env = GqCoreResponse::client_error(Probe::default(), "boom");
        assert_eq!(env.error, Some(true));
        assert_eq!(env.source, Source::Synthetic);
    }
}
