//! Maps a resource path to its synthetic payload.

use crate::generators;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Prefix of the parametrized per-chain resource.
const ECOSYSTEM_PREFIX: &str = "ecosystems/";

type Generator = fn() -> Value;

/// Serialize a payload, degrading to `{}` instead of failing.
fn to_object<T: Serialize>(payload: T) -> Value {
    match serde_json::to_value(payload) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => Value::Object(Map::new()),
        Err(e) => {
            tracing::error!("Failed to serialize synthetic payload: {}", e);
            Value::Object(Map::new())
        }
    }
}

/// Resolves a joined resource path (e.g. `whales`, `ecosystems/solana`) to
/// a synthetic payload object.
///
/// # Example
///
/// ```rust
/// use gq_synthetic::FallbackResolver;
///
/// let resolver = FallbackResolver::new();
///
/// let whales = resolver.resolve("whales");
/// assert!(!whales["top_whales"].as_array().unwrap().is_empty());
///
/// let solana = resolver.resolve("ecosystems/solana");
/// assert_eq!(solana["id"], "solana");
///
/// assert_eq!(resolver.resolve("does-not-exist"), serde_json::json!({}));
/// ```
#[derive(Debug, Clone)]
pub struct FallbackResolver {
    table: HashMap<&'static str, Generator>,
}

impl Default for FallbackResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackResolver {
    /// Build the resolver with one generator per known resource.
    pub fn new() -> Self {
        let entries: [(&'static str, Generator); 12] = [
            ("overview", || to_object(generators::overview())),
            ("risk", || to_object(generators::risk(generators::DEFAULT_RISK_COUNT))),
            ("whales", || to_object(generators::whales(generators::DEFAULT_WHALE_COUNT))),
            ("trends", || to_object(generators::trends())),
            ("map", || to_object(generators::map())),
            ("anomalies", || {
                to_object(generators::anomalies(generators::DEFAULT_ANOMALY_COUNT))
            }),
            ("entities", || {
                to_object(generators::entities(generators::DEFAULT_ENTITY_COUNT))
            }),
            ("narratives", || {
                to_object(generators::narratives(generators::DEFAULT_NARRATIVE_COUNT))
            }),
            ("rings", || to_object(generators::rings(generators::DEFAULT_RING_COUNT))),
            ("system-status", || to_object(generators::system_status())),
            ("health", || to_object(generators::health())),
            ("ecosystems", || to_object(generators::ecosystems())),
        ];

        Self {
            table: entries.into_iter().collect(),
        }
    }

    /// Resource paths with a flat generator.
    pub fn known_paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }

    /// Returns true if `path` produces a non-empty payload.
    pub fn is_known(&self, path: &str) -> bool {
        Self::ecosystem_chain(path).is_some() || self.table.contains_key(path)
    }

    /// Produce the payload for `path`. Always an object; `{}` when unknown.
    pub fn resolve(&self, path: &str) -> Value {
        let path = path.trim_matches('/');

        if let Some(chain) = Self::ecosystem_chain(path) {
            return to_object(generators::ecosystem_detail(chain));
        }

        match self.table.get(path) {
            Some(generate) => generate(),
            None => {
                tracing::debug!("No synthetic generator for '{}'", path);
                Value::Object(Map::new())
            }
        }
    }

    /// `ecosystems/{chain}[/...]` -> `chain`, if non-empty.
    fn ecosystem_chain(path: &str) -> Option<&str> {
        path.strip_prefix(ECOSYSTEM_PREFIX)
            .and_then(|rest| rest.split('/').next())
            .filter(|chain| !chain.is_empty())
    }
}
