//! Per-resource payloads.
//!
//! One struct per top-level resource key. The proxy merges these at the top
//! level of the envelope, so the field names here are the wire names the UI
//! reads.

use crate::records::{
    Connection, Ecosystem, Entity, Event, HeatmapCell, HotZone, HourlyActivity, Movement,
    Narrative, Outlier, Pattern, RiskItem, Ring, ServiceStatus, Whale,
};
use serde::{Deserialize, Serialize};

/// `overview`: dashboard landing summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverviewPayload {
    /// 0-100 aggregate market health.
    pub market_health: f64,
    pub sentiment: String,
    pub total_volume_24h: f64,
    pub active_whales: u32,
    pub high_risk_tokens: u32,
    pub anomalies_detected: u32,
    pub top_risks: Vec<RiskItem>,
    pub recent_events: Vec<Event>,
}

/// `risk`: tokens ranked by risk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskPayload {
    pub top_risks: Vec<RiskItem>,
    pub total_tokens: u32,
    pub average_risk: f64,
}

/// `whales`: large holders and their recent flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhalesPayload {
    pub top_whales: Vec<Whale>,
    pub recent_movements: Vec<Movement>,
    pub hourly_activity: Vec<HourlyActivity>,
    pub total_volume_24h: f64,
}

/// `trends`: detected patterns and the activity curve behind them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendsPayload {
    pub timeframe: String,
    pub patterns: Vec<Pattern>,
    pub hourly_activity: Vec<HourlyActivity>,
}

/// `map`: chain/sector heatmap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPayload {
    pub heatmap: Vec<HeatmapCell>,
    pub hot_zones: Vec<HotZone>,
    pub connections: Vec<Connection>,
}

/// `anomalies`: statistical outliers and the events they raised.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnomaliesPayload {
    pub outliers: Vec<Outlier>,
    pub events: Vec<Event>,
    pub total_anomalies: u32,
}

/// `entities`: labelled address clusters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntitiesPayload {
    pub entities: Vec<Entity>,
    pub total: u32,
}

/// `narratives`: market stories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NarrativesPayload {
    pub narratives: Vec<Narrative>,
}

/// `rings`: coordinated trading groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RingsPayload {
    pub rings: Vec<Ring>,
    pub total_rings: u32,
}

/// `system-status`: backend service health board.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemStatusPayload {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub services: Vec<ServiceStatus>,
}

/// `health`: liveness summary for the intelligence engines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthPayload {
    pub status: String,
    pub latency_ms: f64,
    pub engines: Vec<ServiceStatus>,
}

/// `ecosystems`: all tracked chains.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EcosystemsPayload {
    pub ecosystems: Vec<Ecosystem>,
}

/// `ecosystems/{chain}`: one chain in detail.
///
/// The [`Ecosystem`] fields are flattened so `id` and `name` sit at the top
/// of the envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EcosystemDetailPayload {
    #[serde(flatten)]
    pub ecosystem: Ecosystem,
    pub top_whales: Vec<Whale>,
    pub top_risks: Vec<RiskItem>,
    pub hourly_activity: Vec<HourlyActivity>,
}
