//! API request and response types.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query parameters for the fusion endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FusionQuery {
    /// Day to fuse for, `YYYY-MM-DD`. Defaults to today (UTC).
    pub day: Option<String>,
}
