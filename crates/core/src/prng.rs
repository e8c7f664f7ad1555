//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! A single [`Xorshift64`] stream is seeded once per render call and threaded
//! by `&mut` through every stage of the pipeline: background, color choice,
//! geometry, gradient jitter, texture. Same seed always produces the same
//! sequence of values across all platforms (pure integer arithmetic, no
//! floating point in the core algorithm).

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17) for good statistical
/// properties across the full 64-bit state space. Seed of 0 is automatically
/// replaced with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift algorithm.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    ///
    /// If `seed` is 0, uses `0x5EED_DEAD_BEEF_CAFE` as a fallback to avoid
    /// the xorshift all-zeros fixed point.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    ///
    /// Implements xorshift64 with shifts (13, 7, 17).
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    pub fn next_uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_uniform() * (max - min)
    }

    /// Returns a uniformly distributed integer in `[low, high]` (both inclusive).
    ///
    /// A degenerate range (`high <= low`) still consumes one draw and returns
    /// `low`, so the stream position never depends on the range width.
    pub fn next_int(&mut self, low: i64, high: i64) -> i64 {
        let raw = self.next_u64();
        if high <= low {
            return low;
        }
        let span = (high as i128 - low as i128 + 1) as u128;
        (low as i128 + (raw as u128 % span) as i128) as i64
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// Uses simple modulo reduction. For non-power-of-two `max` values,
    /// this introduces negligible bias at 64-bit state width.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0 (division by zero in modulo).
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }

    /// Picks one element of `items` uniformly.
    ///
    /// Returns `None` for an empty slice without consuming a draw.
    pub fn next_choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_usize(items.len());
        items.get(idx)
    }
}
