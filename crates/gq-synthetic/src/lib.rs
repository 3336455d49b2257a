//! gq-synthetic: Synthetic fallback data for the GQ-Core proxy.
//!
//! When the upstream intelligence API is unreachable the proxy still has to
//! answer with something the dashboard can render. This crate provides:
//!
//! - [`generators`] - one pure function per resource producing a payload
//!   with the same shape as the real endpoint
//! - [`FallbackResolver`] - picks the generator for a resource path,
//!   including the parametrized `ecosystems/{chain}` path
//! - [`SeededRandom`] - a documented, reproducible PRNG keyed by a string
//! - [`EngineCache`] and [`SignalFusion`] - an app-owned TTL cache and the
//!   cross-engine fusion helper that uses it
//!
//! # Example
//!
//! ```rust
//! use gq_synthetic::{generators, FallbackResolver};
//!
//! let whales = generators::whales(3);
//! assert_eq!(whales.top_whales.len(), 3);
//!
//! let payload = FallbackResolver::new().resolve("risk");
//! assert!(payload["top_risks"].is_array());
//! ```

mod cache;
mod fusion;
pub mod generators;
mod resolver;
pub mod seeded;

pub use cache::{EngineCache, DEFAULT_ENGINE_CACHE_TTL};
pub use fusion::{EngineScore, FusedSignal, SignalFusion, ENGINE_WEIGHTS};
pub use resolver::FallbackResolver;
pub use seeded::{seed_for, SeededRandom};
