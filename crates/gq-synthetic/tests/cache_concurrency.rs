//! Engine cache under concurrent use.

use chrono::NaiveDate;
use futures::future::join_all;
use gq_synthetic::{EngineCache, SignalFusion};
use serde_json::json;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_last_write_wins() {
    let cache = Arc::new(EngineCache::default());

    let writes = (0..32).map(|i| {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.set("risk", json!(i)).await })
    });
    join_all(writes).await;

    let value = cache.get("risk").await.unwrap();
    assert!((0..32).contains(&value.as_i64().unwrap()));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_fusion_agrees() {
    let fusion = SignalFusion::new(Arc::new(EngineCache::default()));
    let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    let signals = join_all((0..16).map(|_| fusion.fuse("0xfeed", day))).await;

    let first = signals[0].composite;
    assert!(signals.iter().all(|s| s.composite == first));
    assert_eq!(fusion.cache().len().await, 3);
}
