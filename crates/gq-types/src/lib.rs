//! gq-types: Shared data structures for the GQ-Core resiliency layer
//!
//! This crate defines the types used across the workspace:
//! - [`Source`] - Provenance flag (`real` or `synthetic`)
//! - [`GqCoreResponse`] - Typed response envelope with a flattened payload
//! - Resource records such as [`Whale`], [`RiskItem`] and [`Ring`]
//! - One payload struct per resource, e.g. [`WhalesPayload`]
//!
//! # Example
//!
//! ```rust
//! use gq_types::{GqCoreResponse, RiskPayload, Source};
//!
//! let env = GqCoreResponse::real(RiskPayload::default());
//! assert_eq!(env.source, Source::Real);
//!
//! let json = serde_json::to_value(&env).unwrap();
//! assert!(json["top_risks"].is_array());
//! ```

mod envelope;
mod error;
mod payloads;
mod records;

pub use envelope::{
    now_iso8601, GqCoreResponse, Source, ERROR_KEY, FALLBACK_REASON_KEY, RETRY_COUNT_KEY,
    SOURCE_KEY, TIMESTAMP_KEY,
};
pub use error::TypeError;
pub use payloads::{
    AnomaliesPayload, EcosystemDetailPayload, EcosystemsPayload, EntitiesPayload, HealthPayload,
    MapPayload, NarrativesPayload, OverviewPayload, RingsPayload, RiskPayload,
    SystemStatusPayload, TrendsPayload, WhalesPayload,
};
pub use records::{
    Connection, Direction, Ecosystem, Entity, Event, HeatmapCell, HotZone, HourlyActivity,
    Movement, Narrative, Outlier, Pattern, RiskItem, RiskLevel, Ring, RingNode, ServiceStatus,
    Whale,
};
