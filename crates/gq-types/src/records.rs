//! Resource records.
//!
//! These are display-only values. References between records (for example
//! [`Movement::whale_id`] pointing at a [`Whale::id`]) are plain strings and
//! are never validated. No field is optional, so a record serializes to the
//! same set of keys whether it came from the backend or a generator.

use crate::TypeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse risk bucket derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a 0-100 score.
    ///
    /// ```rust
    /// use gq_types::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::from_score(12.0), RiskLevel::Low);
    /// assert_eq!(RiskLevel::from_score(91.5), RiskLevel::Critical);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            RiskLevel::Critical
        } else if score >= 65.0 {
            RiskLevel::High
        } else if score >= 35.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(TypeError::InvalidRiskLevel(other.to_string())),
        }
    }
}

/// Direction of a whale movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Buy,
    Sell,
    Transfer,
}

/// A token flagged by the risk engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskItem {
    pub id: String,
    pub token: String,
    pub chain: String,
    /// 0-100, higher is riskier.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub liquidity_usd: f64,
    pub volume_24h: f64,
    /// Percent change over 24h.
    pub price_change_24h: f64,
    /// Short machine labels such as `honeypot` or `low_liquidity`.
    pub flags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// A tracked large holder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Whale {
    pub id: String,
    pub address: String,
    pub label: String,
    pub chain: String,
    pub balance_usd: f64,
    pub volume_24h: f64,
    pub transaction_count: u32,
    /// Behavioural classification, e.g. `accumulating`.
    pub behavior: String,
    pub last_active: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

/// A single whale transaction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movement {
    pub id: String,
    /// Loose reference to [`Whale::id`].
    pub whale_id: String,
    pub token: String,
    pub direction: Direction,
    pub amount_usd: f64,
    pub from_address: String,
    pub to_address: String,
    pub chain: String,
    pub tx_hash: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregated activity for one hour of the day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlyActivity {
    /// Hour of day, 0-23.
    pub hour: u8,
    pub volume_usd: f64,
    pub transaction_count: u32,
}

/// One cell of the chain/sector activity heatmap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub chain: String,
    pub sector: String,
    /// Normalized 0-1.
    pub intensity: f64,
    pub volume_usd: f64,
}

/// Something notable the backend detected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub event_type: String,
    pub severity: RiskLevel,
    pub title: String,
    pub description: String,
    pub chain: String,
    pub timestamp: DateTime<Utc>,
}

/// A region of concentrated activity on the map view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HotZone {
    pub id: String,
    pub name: String,
    pub chain: String,
    pub activity_score: f64,
    pub whale_count: u32,
    pub timestamp: DateTime<Utc>,
}

/// Flow between two chains or zones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
    pub volume_usd: f64,
    pub transaction_count: u32,
}

/// A metric that deviates from its expected value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outlier {
    pub id: String,
    pub address: String,
    pub metric: String,
    pub value: f64,
    pub expected: f64,
    pub z_score: f64,
    pub severity: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

/// A recurring market pattern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pattern {
    pub id: String,
    pub name: String,
    pub pattern_type: String,
    /// 0-1.
    pub confidence: f64,
    pub tokens: Vec<String>,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// A labelled cluster of addresses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub entity_type: String,
    pub addresses: Vec<String>,
    pub chain: String,
    pub total_value_usd: f64,
    pub risk_score: f64,
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// An address participating in a [`Ring`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RingNode {
    pub address: String,
    pub role: String,
    pub volume_usd: f64,
}

/// A group of addresses trading in a coordinated way.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ring {
    pub id: String,
    pub name: String,
    pub ring_type: String,
    pub risk_score: f64,
    pub total_volume_usd: f64,
    pub nodes: Vec<RingNode>,
    pub timestamp: DateTime<Utc>,
}

/// Per-chain summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ecosystem {
    /// Lowercase chain key, e.g. `ethereum`.
    pub id: String,
    pub name: String,
    pub tvl_usd: f64,
    pub volume_24h: f64,
    pub change_24h: f64,
    pub active_addresses: u64,
    pub whale_count: u32,
    pub risk_score: f64,
    pub top_tokens: Vec<String>,
    /// Not `timestamp`: the detail view flattens this record into the
    /// envelope, which owns that key.
    pub updated_at: DateTime<Utc>,
}

/// A market story gaining or losing traction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Narrative {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// -1 (bearish) to 1 (bullish).
    pub sentiment: f64,
    /// 0-100.
    pub momentum: f64,
    pub related_tokens: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Health of one backend service or engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub name: String,
    pub status: String,
    pub latency_ms: f64,
    pub uptime_percent: f64,
    pub last_check: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_buckets() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(35.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(64.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(65.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_parse() {
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("extreme".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Transfer).unwrap();
        assert_eq!(json, "\"transfer\"");
    }

    #[test]
    fn test_ring_nodes_nested() {
        let ring = Ring {
            id: "ring-1".into(),
            nodes: vec![RingNode {
                address: "0xabc".into(),
                role: "hub".into(),
                volume_usd: 10.0,
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&ring).unwrap();
        assert_eq!(value["nodes"][0]["role"], "hub");
    }
}
