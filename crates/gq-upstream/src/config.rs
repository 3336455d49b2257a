//! Configuration for the upstream layer.
//!
//! The only knob is where the intelligence backend lives.
//!
//! # Environment Variables
//!
//! - `BACKEND_URL`: upstream base URL (default: the public hosted instance)

use crate::error::{ConfigError, TransportError};
use std::env;
use url::Url;

/// Public hosted backend used when `BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "https://api.gq-core.xyz";

/// Path prefix every resource lives under on the backend.
pub const UPSTREAM_PREFIX: &str = "gq-core";

/// Where to send proxied requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Create a config for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::Invalid {
            name: "BACKEND_URL",
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: "BACKEND_URL",
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Load from the `BACKEND_URL` environment variable.
    ///
    /// Falls back to [`DEFAULT_BACKEND_URL`] when the variable is unset or
    /// empty. A set-but-invalid value is an error rather than a silent
    /// fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("BACKEND_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}/gq-core/{path}[?query]`.
    ///
    /// ```rust
    /// use gq_upstream::UpstreamConfig;
    ///
    /// let config = UpstreamConfig::new("http://localhost:8000/").unwrap();
    /// let url = config.resource_url("ecosystems/solana", None).unwrap();
    /// assert_eq!(url.as_str(), "http://localhost:8000/gq-core/ecosystems/solana");
    ///
    /// assert!(config.resource_url("../admin", None).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if the URL does not parse, or
    /// if dot segments in `path` resolve to somewhere outside `/gq-core/`.
    pub fn resource_url(&self, path: &str, query: Option<&str>) -> Result<Url, TransportError> {
        let root = Url::parse(&format!("{}/{}/", self.base_url, UPSTREAM_PREFIX))?;

        let mut raw = format!("{}{}", root, path.trim_start_matches('/'));
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            raw.push('?');
            raw.push_str(q);
        }
        let url = Url::parse(&raw)?;

        if !url.path().starts_with(root.path()) {
            return Err(TransportError::InvalidUrl(format!(
                "path escapes /{}/: {}",
                UPSTREAM_PREFIX, path
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(UpstreamConfig::default().base_url(), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = UpstreamConfig::new("http://backend:9000/").unwrap();
        assert_eq!(config.base_url(), "http://backend:9000");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(UpstreamConfig::new("not a url").is_err());
        assert!(UpstreamConfig::new("ftp://backend").is_err());
    }

    #[test]
    fn test_resource_url_with_query() {
        let config = UpstreamConfig::new("http://backend:9000").unwrap();
        let url = config.resource_url("whales", Some("limit=5")).unwrap();
        assert_eq!(url.as_str(), "http://backend:9000/gq-core/whales?limit=5");

        let url = config.resource_url("whales", Some("")).unwrap();
        assert_eq!(url.as_str(), "http://backend:9000/gq-core/whales");
    }

    #[test]
    fn test_resource_url_stays_under_prefix() {
        let config = UpstreamConfig::new("http://backend:9000/api").unwrap();

        for path in ["../admin/users", "whales/../../admin", "%2e%2e/admin", "./../x"] {
            assert!(
                matches!(
                    config.resource_url(path, None),
                    Err(TransportError::InvalidUrl(_))
                ),
                "{} was not rejected",
                path
            );
        }

        // Dot segments that stay inside the prefix are harmless.
        let url = config.resource_url("whales/../risk", None).unwrap();
        assert_eq!(url.as_str(), "http://backend:9000/api/gq-core/risk");
    }
}
