//! Error types for the upstream layer.
//!
//! We use simple enums with `thiserror`. External errors (reqwest) are
//! converted into owned strings immediately; the proxy only ever needs the
//! message to report as `fallback_reason`.

use thiserror::Error;

/// Failures to obtain any response from the upstream.
///
/// A well-formed HTTP error status is NOT a `TransportError`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset, aborted request.
    #[error("network error: {0}")]
    Network(String),

    /// The HTTP client gave up waiting.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The response started but the body could not be read.
    #[error("body error: {0}")]
    Body(String),

    /// The request URL could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for TransportError {
    #[inline]
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for TransportError {
    #[inline]
    fn from(err: url::ParseError) -> Self {
        TransportError::InvalidUrl(err.to_string())
    }
}

/// Configuration errors (bad environment values).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
