//! Synthetic payload generators.
//!
//! One function per top-level resource. Each builds the same `gq-types`
//! payload struct the backend returns, filled with plausible random values
//! from the thread-local RNG. Generators do no I/O and always produce at
//! least one element in every collection field.

use chrono::{DateTime, Duration, Utc};
use gq_types::{
    AnomaliesPayload, Connection, Direction, Ecosystem, EcosystemDetailPayload, EcosystemsPayload,
    EntitiesPayload, Entity, Event, HealthPayload, HeatmapCell, HotZone, HourlyActivity,
    MapPayload, Movement, Narrative, NarrativesPayload, Outlier, OverviewPayload, Pattern,
    RingNode, Ring, RingsPayload, RiskItem, RiskLevel, RiskPayload, ServiceStatus,
    SystemStatusPayload, TrendsPayload, Whale, WhalesPayload,
};
use rand::Rng;

/// Default collection sizes when a caller has no preference.
pub const DEFAULT_RISK_COUNT: usize = 10;
pub const DEFAULT_WHALE_COUNT: usize = 10;
pub const DEFAULT_ANOMALY_COUNT: usize = 6;
pub const DEFAULT_ENTITY_COUNT: usize = 8;
pub const DEFAULT_NARRATIVE_COUNT: usize = 5;
pub const DEFAULT_RING_COUNT: usize = 4;

const CHAINS: &[&str] = &[
    "ethereum", "solana", "bitcoin", "arbitrum", "base", "polygon", "bsc", "avalanche",
];

const TOKENS: &[&str] = &[
    "ETH", "SOL", "BTC", "ARB", "OP", "PEPE", "WIF", "BONK", "LINK", "UNI", "AAVE", "JUP",
    "HYPE", "DOGE", "MATIC", "AVAX",
];

const SECTORS: &[&str] = &["defi", "memecoins", "nft", "gaming", "infrastructure", "stablecoins"];

const RISK_FLAGS: &[&str] = &[
    "low_liquidity",
    "concentrated_holders",
    "honeypot_suspect",
    "mint_authority",
    "wash_trading",
    "new_listing",
];

const WHALE_LABELS: &[&str] = &[
    "Smart Money",
    "Market Maker",
    "Fund Wallet",
    "Early Investor",
    "Exchange Hot Wallet",
    "Unknown Whale",
];

const BEHAVIORS: &[&str] = &["accumulating", "distributing", "holding", "rotating"];

const EVENT_TYPES: &[&str] = &[
    "large_transfer",
    "liquidity_pull",
    "volume_spike",
    "price_dislocation",
    "new_whale",
];

const PATTERN_TYPES: &[&str] = &["breakout", "accumulation", "distribution", "rotation", "squeeze"];

const ENTITY_TYPES: &[&str] = &["exchange", "fund", "market_maker", "bridge", "dao", "individual"];

const RING_TYPES: &[&str] = &["wash_trading", "pump_and_dump", "sybil", "sandwich"];

const RING_ROLES: &[&str] = &["hub", "relay", "sink", "funder"];

const NARRATIVES: &[(&str, &str)] = &[
    ("Restaking Season", "Capital rotating into restaking protocols and LRTs."),
    ("Memecoin Mania", "Retail flows concentrating in high-beta meme tokens."),
    ("AI Agents Onchain", "Agent tokens gaining volume and social share."),
    ("RWA Tokenization", "Treasuries and credit products moving onchain."),
    ("L2 Consolidation", "Activity concentrating on a few rollups."),
    ("Perp DEX Growth", "Onchain derivatives volume taking share from CEXs."),
];

const SERVICES: &[&str] = &[
    "risk-engine",
    "whale-tracker",
    "ring-detector",
    "anomaly-detector",
    "narrative-engine",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn pick_many<R: Rng + ?Sized>(rng: &mut R, items: &[&str], max: usize) -> Vec<String> {
    let n = rng.random_range(1..=max.max(1));
    (0..n).map(|_| pick(rng, items).to_string()).collect()
}

fn hex<R: Rng + ?Sized>(rng: &mut R, bytes: usize) -> String {
    let mut out = String::with_capacity(2 + bytes * 2);
    out.push_str("0x");
    for _ in 0..bytes {
        out.push_str(&format!("{:02x}", rng.random::<u8>()));
    }
    out
}

fn address<R: Rng + ?Sized>(rng: &mut R) -> String {
    hex(rng, 20)
}

fn short_id<R: Rng + ?Sized>(rng: &mut R, prefix: &str) -> String {
    format!("{}-{:08x}", prefix, rng.random::<u32>())
}

fn recent<R: Rng + ?Sized>(rng: &mut R, max_secs: i64) -> DateTime<Utc> {
    Utc::now() - Duration::seconds(rng.random_range(0..max_secs.max(1)))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn display_name(chain: &str) -> String {
    let mut chars = chain.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn risk_item<R: Rng + ?Sized>(rng: &mut R, chain: &str) -> RiskItem {
    let risk_score = round2(rng.random_range(5.0..99.0));
    RiskItem {
        id: short_id(rng, "risk"),
        token: pick(rng, TOKENS).to_string(),
        chain: chain.to_string(),
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        liquidity_usd: round2(rng.random_range(10_000.0..50_000_000.0)),
        volume_24h: round2(rng.random_range(5_000.0..120_000_000.0)),
        price_change_24h: round2(rng.random_range(-35.0..35.0)),
        flags: pick_many(rng, RISK_FLAGS, 3),
        timestamp: recent(rng, 3_600),
    }
}

fn whale<R: Rng + ?Sized>(rng: &mut R, chain: &str) -> Whale {
    let last_active = recent(rng, 6 * 3_600);
    Whale {
        id: short_id(rng, "whale"),
        address: address(rng),
        label: pick(rng, WHALE_LABELS).to_string(),
        chain: chain.to_string(),
        balance_usd: round2(rng.random_range(1_000_000.0..900_000_000.0)),
        volume_24h: round2(rng.random_range(100_000.0..80_000_000.0)),
        transaction_count: rng.random_range(1..400),
        behavior: pick(rng, BEHAVIORS).to_string(),
        last_active,
        timestamp: Utc::now(),
    }
}

fn movement<R: Rng + ?Sized>(rng: &mut R, whale: &Whale) -> Movement {
    let direction = match rng.random_range(0..3) {
        0 => Direction::Buy,
        1 => Direction::Sell,
        _ => Direction::Transfer,
    };
    Movement {
        id: short_id(rng, "mv"),
        whale_id: whale.id.clone(),
        token: pick(rng, TOKENS).to_string(),
        direction,
        amount_usd: round2(rng.random_range(50_000.0..25_000_000.0)),
        from_address: whale.address.clone(),
        to_address: address(rng),
        chain: whale.chain.clone(),
        tx_hash: hex(rng, 32),
        timestamp: recent(rng, 3_600),
    }
}

fn hourly_activity<R: Rng + ?Sized>(rng: &mut R) -> Vec<HourlyActivity> {
    (0..24u8)
        .map(|hour| HourlyActivity {
            hour,
            volume_usd: round2(rng.random_range(500_000.0..60_000_000.0)),
            transaction_count: rng.random_range(10..2_500),
        })
        .collect()
}

fn event<R: Rng + ?Sized>(rng: &mut R) -> Event {
    let event_type = pick(rng, EVENT_TYPES);
    let token = pick(rng, TOKENS);
    let chain = pick(rng, CHAINS);
    Event {
        id: short_id(rng, "evt"),
        event_type: event_type.to_string(),
        severity: RiskLevel::from_score(rng.random_range(0.0..100.0)),
        title: format!("{} on {}", event_type.replace('_', " "), token),
        description: format!("Unusual {} activity detected for {} on {}.", event_type, token, chain),
        chain: chain.to_string(),
        timestamp: recent(rng, 2 * 3_600),
    }
}

fn service<R: Rng + ?Sized>(rng: &mut R, name: &str) -> ServiceStatus {
    let degraded = rng.random_bool(0.1);
    let max_latency = if degraded { 2_500.0 } else { 250.0 };
    ServiceStatus {
        name: name.to_string(),
        status: if degraded { "degraded" } else { "operational" }.to_string(),
        latency_ms: round2(rng.random_range(8.0..max_latency)),
        uptime_percent: round2(rng.random_range(97.0..100.0)),
        last_check: recent(rng, 60),
    }
}

fn ecosystem<R: Rng + ?Sized>(rng: &mut R, chain: &str) -> Ecosystem {
    Ecosystem {
        id: chain.to_lowercase(),
        name: display_name(chain),
        tvl_usd: round2(rng.random_range(50_000_000.0..60_000_000_000.0)),
        volume_24h: round2(rng.random_range(10_000_000.0..8_000_000_000.0)),
        change_24h: round2(rng.random_range(-15.0..15.0)),
        active_addresses: rng.random_range(5_000..2_000_000),
        whale_count: rng.random_range(5..600),
        risk_score: round2(rng.random_range(5.0..80.0)),
        top_tokens: pick_many(rng, TOKENS, 5),
        updated_at: Utc::now(),
    }
}

/// `overview`
pub fn overview() -> OverviewPayload {
    let mut rng = rand::rng();
    let market_health = round2(rng.random_range(20.0..95.0));
    let sentiment = if market_health >= 65.0 {
        "bullish"
    } else if market_health >= 40.0 {
        "neutral"
    } else {
        "bearish"
    };
    let top_risks: Vec<RiskItem> = (0..3)
        .map(|_| {
            let chain = pick(&mut rng, CHAINS);
            risk_item(&mut rng, chain)
        })
        .collect();
    let recent_events = (0..5).map(|_| event(&mut rng)).collect();

    OverviewPayload {
        market_health,
        sentiment: sentiment.to_string(),
        total_volume_24h: round2(rng.random_range(1e9..9e10)),
        active_whales: rng.random_range(50..1_500),
        high_risk_tokens: rng.random_range(1..80),
        anomalies_detected: rng.random_range(0..40),
        top_risks,
        recent_events,
    }
}

/// `risk`
pub fn risk(count: usize) -> RiskPayload {
    let mut rng = rand::rng();
    let mut top_risks: Vec<RiskItem> = (0..count.max(1))
        .map(|_| {
            let chain = pick(&mut rng, CHAINS);
            risk_item(&mut rng, chain)
        })
        .collect();
    top_risks.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));

    let average_risk =
        round2(top_risks.iter().map(|r| r.risk_score).sum::<f64>() / top_risks.len() as f64);

    RiskPayload {
        total_tokens: top_risks.len() as u32 + rng.random_range(0..500),
        average_risk,
        top_risks,
    }
}

/// `whales`
pub fn whales(count: usize) -> WhalesPayload {
    let mut rng = rand::rng();
    let mut top_whales: Vec<Whale> = (0..count.max(1))
        .map(|_| {
            let chain = pick(&mut rng, CHAINS);
            whale(&mut rng, chain)
        })
        .collect();
    top_whales.sort_by(|a, b| b.balance_usd.total_cmp(&a.balance_usd));

    let recent_movements: Vec<Movement> = (0..top_whales.len() * 2)
        .map(|i| movement(&mut rng, &top_whales[i % top_whales.len()]))
        .collect();

    WhalesPayload {
        total_volume_24h: round2(top_whales.iter().map(|w| w.volume_24h).sum()),
        hourly_activity: hourly_activity(&mut rng),
        recent_movements,
        top_whales,
    }
}

/// `trends`
pub fn trends() -> TrendsPayload {
    let mut rng = rand::rng();
    let patterns = (0..rng.random_range(3..7))
        .map(|_| {
            let pattern_type = pick(&mut rng, PATTERN_TYPES);
            let tokens = pick_many(&mut rng, TOKENS, 3);
            Pattern {
                id: short_id(&mut rng, "pat"),
                name: format!("{} {}", tokens[0], pattern_type),
                pattern_type: pattern_type.to_string(),
                confidence: round2(rng.random_range(0.4..0.99)),
                description: format!("{} forming across {}", pattern_type, tokens.join(", ")),
                tokens,
                timestamp: recent(&mut rng, 6 * 3_600),
            }
        })
        .collect();

    TrendsPayload {
        timeframe: "24h".to_string(),
        patterns,
        hourly_activity: hourly_activity(&mut rng),
    }
}

/// `map`
pub fn map() -> MapPayload {
    let mut rng = rand::rng();

    let mut heatmap = Vec::with_capacity(CHAINS.len() * SECTORS.len());
    for chain in CHAINS {
        for sector in SECTORS {
            heatmap.push(HeatmapCell {
                chain: chain.to_string(),
                sector: sector.to_string(),
                intensity: round2(rng.random_range(0.0..1.0)),
                volume_usd: round2(rng.random_range(100_000.0..500_000_000.0)),
            });
        }
    }

    let hot_zones = (0..rng.random_range(3..6))
        .map(|_| {
            let chain = pick(&mut rng, CHAINS);
            let sector = pick(&mut rng, SECTORS);
            HotZone {
                id: short_id(&mut rng, "zone"),
                name: format!("{} {}", display_name(chain), sector),
                chain: chain.to_string(),
                activity_score: round2(rng.random_range(50.0..100.0)),
                whale_count: rng.random_range(1..120),
                timestamp: recent(&mut rng, 3_600),
            }
        })
        .collect();

    let connections = (0..rng.random_range(4..10))
        .map(|_| {
            let source = pick(&mut rng, CHAINS);
            let mut target = pick(&mut rng, CHAINS);
            if target == source {
                target = if source == CHAINS[0] { CHAINS[1] } else { CHAINS[0] };
            }
            Connection {
                source: source.to_string(),
                target: target.to_string(),
                volume_usd: round2(rng.random_range(1_000_000.0..900_000_000.0)),
                transaction_count: rng.random_range(10..20_000),
            }
        })
        .collect();

    MapPayload {
        heatmap,
        hot_zones,
        connections,
    }
}

/// `anomalies`
pub fn anomalies(count: usize) -> AnomaliesPayload {
    let mut rng = rand::rng();
    let outliers: Vec<Outlier> = (0..count.max(1))
        .map(|_| {
            let expected = round2(rng.random_range(1_000.0..1_000_000.0));
            let z_score = round2(rng.random_range(2.0..9.0));
            Outlier {
                id: short_id(&mut rng, "out"),
                address: address(&mut rng),
                metric: pick(&mut rng, &["volume", "tx_count", "gas_spent", "holder_change"])
                    .to_string(),
                value: round2(expected * (1.0 + z_score / 2.0)),
                expected,
                z_score,
                severity: RiskLevel::from_score(z_score * 10.0),
                timestamp: recent(&mut rng, 3_600),
            }
        })
        .collect();
    let events = (0..outliers.len().min(5)).map(|_| event(&mut rng)).collect();

    AnomaliesPayload {
        total_anomalies: outliers.len() as u32,
        outliers,
        events,
    }
}

/// `entities`
pub fn entities(count: usize) -> EntitiesPayload {
    let mut rng = rand::rng();
    let entities: Vec<Entity> = (0..count.max(1))
        .map(|i| {
            let entity_type = pick(&mut rng, ENTITY_TYPES);
            let addresses = (0..rng.random_range(1..6)).map(|_| address(&mut rng)).collect();
            Entity {
                id: short_id(&mut rng, "ent"),
                name: format!("{} {}", display_name(entity_type), i + 1),
                entity_type: entity_type.to_string(),
                addresses,
                chain: pick(&mut rng, CHAINS).to_string(),
                total_value_usd: round2(rng.random_range(1_000_000.0..5_000_000_000.0)),
                risk_score: round2(rng.random_range(0.0..100.0)),
                tags: pick_many(&mut rng, &["kyc", "sanctioned", "labelled", "active", "dormant"], 2),
                timestamp: recent(&mut rng, 24 * 3_600),
            }
        })
        .collect();

    EntitiesPayload {
        total: entities.len() as u32,
        entities,
    }
}

/// `narratives`
pub fn narratives(count: usize) -> NarrativesPayload {
    let mut rng = rand::rng();
    let narratives = (0..count.max(1))
        .map(|i| {
            let (title, summary) = NARRATIVES[i % NARRATIVES.len()];
            Narrative {
                id: short_id(&mut rng, "nar"),
                title: title.to_string(),
                summary: summary.to_string(),
                sentiment: round2(rng.random_range(-1.0..1.0)),
                momentum: round2(rng.random_range(0.0..100.0)),
                related_tokens: pick_many(&mut rng, TOKENS, 4),
                timestamp: recent(&mut rng, 12 * 3_600),
            }
        })
        .collect();

    NarrativesPayload { narratives }
}

/// `rings`
pub fn rings(count: usize) -> RingsPayload {
    let mut rng = rand::rng();
    let rings: Vec<Ring> = (0..count.max(1))
        .map(|i| {
            let nodes: Vec<RingNode> = (0..rng.random_range(3..9))
                .map(|n| RingNode {
                    address: address(&mut rng),
                    role: if n == 0 {
                        "hub".to_string()
                    } else {
                        pick(&mut rng, RING_ROLES).to_string()
                    },
                    volume_usd: round2(rng.random_range(10_000.0..20_000_000.0)),
                })
                .collect();
            let ring_type = pick(&mut rng, RING_TYPES);
            Ring {
                id: short_id(&mut rng, "ring"),
                name: format!("Ring {} ({})", i + 1, ring_type.replace('_', " ")),
                ring_type: ring_type.to_string(),
                risk_score: round2(rng.random_range(40.0..99.0)),
                total_volume_usd: round2(nodes.iter().map(|n| n.volume_usd).sum()),
                nodes,
                timestamp: recent(&mut rng, 24 * 3_600),
            }
        })
        .collect();

    RingsPayload {
        total_rings: rings.len() as u32,
        rings,
    }
}

/// `system-status`
pub fn system_status() -> SystemStatusPayload {
    let mut rng = rand::rng();
    let services: Vec<ServiceStatus> = SERVICES.iter().map(|s| service(&mut rng, s)).collect();
    let status = if services.iter().any(|s| s.status != "operational") {
        "degraded"
    } else {
        "operational"
    };

    SystemStatusPayload {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: rng.random_range(3_600..30 * 24 * 3_600),
        services,
    }
}

/// `health`
pub fn health() -> HealthPayload {
    let mut rng = rand::rng();
    let engines: Vec<ServiceStatus> = SERVICES.iter().map(|s| service(&mut rng, s)).collect();
    let latency_ms = round2(engines.iter().map(|e| e.latency_ms).sum::<f64>() / engines.len() as f64);

    HealthPayload {
        status: "ok".to_string(),
        latency_ms,
        engines,
    }
}

/// `ecosystems`
pub fn ecosystems() -> EcosystemsPayload {
    let mut rng = rand::rng();
    let mut ecosystems: Vec<Ecosystem> = CHAINS.iter().map(|c| ecosystem(&mut rng, c)).collect();
    ecosystems.sort_by(|a, b| b.tvl_usd.total_cmp(&a.tvl_usd));
    EcosystemsPayload { ecosystems }
}

/// `ecosystems/{chain}`: `id` and `name` come from `chain`.
pub fn ecosystem_detail(chain: &str) -> EcosystemDetailPayload {
    let mut rng = rand::rng();
    let chain = chain.to_lowercase();

    let top_whales = (0..5).map(|_| whale(&mut rng, &chain)).collect();
    let top_risks = (0..5).map(|_| risk_item(&mut rng, &chain)).collect();

    EcosystemDetailPayload {
        ecosystem: ecosystem(&mut rng, &chain),
        top_whales,
        top_risks,
        hourly_activity: hourly_activity(&mut rng),
    }
}
