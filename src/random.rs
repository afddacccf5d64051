//! Pseudo-random source for effects
//!
//! Effects only need a bounded integer, so the source is a one-method trait.
//! [`SplitMixRandom`] is a small deterministic generator seeded once from
//! the monotonic clock.

use embassy_time::Instant;

/// Source of bounded random integers
pub trait RandomSource {
    /// Return a value uniformly distributed in `[0, bound)`
    ///
    /// An empty range (`bound == 0`) returns 0.
    fn random_bounded(&mut self, bound: u32) -> u32;
}

/// SplitMix64 generator
#[derive(Debug, Clone)]
pub struct SplitMixRandom {
    state: u64,
}

impl SplitMixRandom {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from a monotonic timestamp, typically `Instant::now()` at boot
    pub fn from_instant(now: Instant) -> Self {
        Self::new(now.as_ticks())
    }

    /// Next raw 32-bit value
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as u32
    }
}

impl RandomSource for SplitMixRandom {
    #[allow(clippy::cast_possible_truncation)]
    fn random_bounded(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // Multiply-shift keeps the result below `bound` without a division
        ((u64::from(self.next_u32()) * u64::from(bound)) >> 32) as u32
    }
}
