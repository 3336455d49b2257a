//! Cross-engine signal fusion.
//!
//! Combines per-engine scores for one entity into a composite. Each engine
//! score is read from the [`EngineCache`] when fresh, otherwise derived from
//! a [`SeededRandom`] keyed by engine, entity and day, then cached. The
//! derived score is stable for the whole day, so repeated calls (and other
//! processes) agree on it.

use crate::cache::EngineCache;
use crate::seeded::{seed_for, SeededRandom};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Engines contributing to the composite, with their weights.
pub const ENGINE_WEIGHTS: [(&str, f64); 3] = [("risk", 0.5), ("whales", 0.3), ("anomalies", 0.2)];

/// One engine's contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineScore {
    pub engine: String,
    /// 0-100.
    pub score: f64,
    pub weight: f64,
    /// True when the score came from the cache.
    pub cached: bool,
}

/// Fused view of an entity on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedSignal {
    pub entity: String,
    pub day: NaiveDate,
    /// Weighted mean of the engine scores, 0-100.
    pub composite: f64,
    pub engines: Vec<EngineScore>,
}

/// Fusion helper over an injected cache.
///
/// # Example
///
/// ```rust
/// use gq_synthetic::{EngineCache, SignalFusion};
/// use chrono::NaiveDate;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let fusion = SignalFusion::new(Arc::new(EngineCache::default()));
///     let day = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
///
///     let first = fusion.fuse("0xabc", day).await;
///     let second = fusion.fuse("0xabc", day).await;
///     assert_eq!(first.composite, second.composite);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SignalFusion {
    cache: Arc<EngineCache>,
}

impl SignalFusion {
    pub fn new(cache: Arc<EngineCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<EngineCache> {
        &self.cache
    }

    /// Cache key for one engine's score of `entity` on `day`.
    pub fn cache_key(engine: &str, entity: &str, day: NaiveDate) -> String {
        format!("{}:{}", engine, seed_for(entity, day))
    }

    /// Deterministic 0-100 score for `engine` on `entity`/`day`.
    pub fn derived_score(engine: &str, entity: &str, day: NaiveDate) -> f64 {
        let mut rng = SeededRandom::new(&Self::cache_key(engine, entity, day));
        round2(rng.next_range(0.0, 100.0))
    }

    /// Fuse all engine scores for `entity` on `day`.
    pub async fn fuse(&self, entity: &str, day: NaiveDate) -> FusedSignal {
        let mut engines = Vec::with_capacity(ENGINE_WEIGHTS.len());

        for (engine, weight) in ENGINE_WEIGHTS {
            let key = Self::cache_key(engine, entity, day);

            let (score, cached) = match self.cache.get(&key).await.as_ref().and_then(Value::as_f64) {
                Some(score) => (score, true),
                None => {
                    let score = Self::derived_score(engine, entity, day);
                    self.cache.set(key, Value::from(score)).await;
                    (score, false)
                }
            };

            engines.push(EngineScore {
                engine: engine.to_string(),
                score,
                weight,
                cached,
            });
        }

        let total_weight: f64 = engines.iter().map(|e| e.weight).sum();
        let composite = if total_weight > 0.0 {
            round2(engines.iter().map(|e| e.score * e.weight).sum::<f64>() / total_weight)
        } else {
            0.0
        };

        tracing::debug!("Fused signal for {} on {}: {}", entity, day, composite);

        FusedSignal {
            entity: entity.to_string(),
            day,
            composite,
            engines,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    #[tokio::test]
    async fn test_second_call_hits_cache() {
        let fusion = SignalFusion::new(Arc::new(EngineCache::default()));
        let first = fusion.fuse("0xabc", day()).await;
        assert!(first.engines.iter().all(|e| !e.cached));

        let second = fusion.fuse("0xabc", day()).await;
        assert!(second.engines.iter().all(|e| e.cached));
        assert_eq!(first.composite, second.composite);
    }

    #[tokio::test]
    async fn test_stable_without_cache() {
        let a = SignalFusion::new(Arc::new(EngineCache::new(Duration::ZERO)));
        let b = SignalFusion::new(Arc::new(EngineCache::new(Duration::ZERO)));
        assert_eq!(a.fuse("0xabc", day()).await, b.fuse("0xabc", day()).await);
    }

    #[tokio::test]
    async fn test_cached_engine_result_is_used() {
        let cache = Arc::new(EngineCache::default());
        cache
            .set(SignalFusion::cache_key("risk", "0xabc", day()), json!(100.0))
            .await;
        cache
            .set(SignalFusion::cache_key("whales", "0xabc", day()), json!(0.0))
            .await;
        cache
            .set(SignalFusion::cache_key("anomalies", "0xabc", day()), json!(50.0))
            .await;

        let signal = SignalFusion::new(cache).fuse("0xabc", day()).await;
        // 100 * 0.5 + 0 * 0.3 + 50 * 0.2
        assert_eq!(signal.composite, 60.0);
    }

    #[test]
    fn test_derived_score_range_and_day_sensitivity() {
        let today = SignalFusion::derived_score("risk", "0xabc", day());
        assert!((0.0..=100.0).contains(&today));

        let tomorrow = day().succ_opt().unwrap();
        let other = SignalFusion::derived_score("risk", "0xabc", tomorrow);
        assert_ne!(today, other);
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(
            SignalFusion::cache_key("risk", "0xabc", day()),
            "risk:0xabc:2026-01-10"
        );
    }
}
