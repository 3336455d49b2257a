//! reqwest-backed transport.

use crate::{error::TransportError, RequestMethod, Transport, UpstreamRequest, UpstreamResponse};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

/// Production transport.
///
/// No per-request timeout is configured beyond the reqwest defaults; the
/// proxy's retry loop is the only resilience mechanism.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a fresh connection pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (shares its connection pool).
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let method = match request.method {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http_client.request(method, request.url.clone());

        if let Some(auth) = &request.authorization {
            builder = builder.header(AUTHORIZATION, auth);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.url,
            status,
            body.len()
        );

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
