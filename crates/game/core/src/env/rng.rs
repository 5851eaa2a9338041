//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in the game (bullet layouts, measurement collapse)
//! draws from an [`RngOracle`] keyed by an explicit seed. The engine never
//! touches ambient randomness, so a game replays identically from its seed.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value.

/// Seed contexts used with [`compute_seed`] so independent draws inside the
/// same intent never share a seed.
pub mod context {
    /// Uniform sample compared against the LIVE probability.
    pub const MEASURE_SAMPLE: u32 = 0;
    /// Fair coin used when the LIVE probability is exactly one half.
    pub const MEASURE_COIN: u32 = 1;
    /// Number of LIVE bullets in a fresh load.
    pub const LOADOUT_COUNT: u32 = 2;
    /// Base context for the Fisher-Yates swaps of a fresh load.
    pub const LOADOUT_SHUFFLE: u32 = 16;
}

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit_f64(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / 4_294_967_296.0
    }

    /// Fair coin flip.
    ///
    /// Uses the top bit, which is the best-mixed bit of the PCG output.
    fn coin(&self, seed: u64) -> bool {
        self.next_u32(seed) >> 31 == 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. Each call performs a single step from the given seed, so the
/// generator itself is stateless and can be shared freely.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute deterministic seed from game state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at game start (for replay/determinism)
/// * `nonce` - Accepted-intent sequence number
/// * `round` - Round number the draw belongs to
/// * `context` - One of the [`context`] constants (plus an offset for loops)
pub fn compute_seed(game_seed: u64, nonce: u64, round: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(round).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
