//! Error types for the client.

use thiserror::Error;

/// Errors raised while building a client.
///
/// Fetch failures are never surfaced as errors; hooks fold them into the
/// envelope instead.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid proxy base url: {0}")]
    InvalidBaseUrl(String),
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidBaseUrl(err.to_string())
    }
}
