//! Error types for gq-types.

use thiserror::Error;

/// Errors that can occur when working with types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// Unknown provenance flag.
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// Unknown risk level label.
    #[error("invalid risk level: {0}")]
    InvalidRiskLevel(String),
}
