//! Deterministic PRNG keyed by a string.
//!
//! # Algorithm
//!
//! 1. Hash the seed string with 32-bit FNV-1a (offset basis `0x811c9dc5`,
//!    prime `0x01000193`) over its UTF-8 bytes.
//! 2. Use the hash as the state of a xorshift32 generator with shifts
//!    13 / 17 / 5. A zero hash is replaced by [`ZERO_SEED_STATE`], since
//!    xorshift never leaves the zero state.
//! 3. Each step yields the new 32-bit state; [`SeededRandom::next_f64`]
//!    maps it to `[0, 1)` by dividing by 2^32.
//!
//! The same seed always yields the same sequence, on every platform.

use chrono::NaiveDate;
use rand::RngCore;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// State substituted when a seed hashes to zero.
pub const ZERO_SEED_STATE: u32 = 0x9e37_79b9;

/// 32-bit FNV-1a hash of `input`.
pub fn fnv1a32(input: &str) -> u32 {
    input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Seed string for a per-entity, per-day stable value: `"{entity}:{YYYY-MM-DD}"`.
pub fn seed_for(entity: &str, day: NaiveDate) -> String {
    format!("{}:{}", entity, day.format("%Y-%m-%d"))
}

/// xorshift32 generator seeded from a string.
///
/// Implements [`RngCore`], so it can drive anything that takes a `rand`
/// generator when reproducible output is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a generator for `seed`.
    pub fn new(seed: &str) -> Self {
        let hash = fnv1a32(seed);
        Self {
            state: if hash == 0 { ZERO_SEED_STATE } else { hash },
        }
    }

    /// Advance and return the next raw 32-bit value.
    #[inline]
    pub fn next_state(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_state()) / 4_294_967_296.0
    }

    /// Next value in `[low, high)`.
    pub fn next_range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_state()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_state());
        let lo = u64::from(self.next_state());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_state().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
