//! Injected sources of nondeterminism.
//!
//! The engine never reads ambient randomness. Measurement draws come from an
//! [`RngOracle`] and fresh bullet layouts from a [`LoadoutOracle`]; the
//! [`GameEnv`] aggregate bundles both so the engine can reach them without
//! hard coupling to concrete implementations.
mod loadout;
mod rng;

pub use loadout::{FixedLoadout, Loadout, LoadoutOracle, RandomLoadout};
pub use rng::{PcgRng, RngOracle, compute_seed, context};

/// Aggregates the oracles required by the turn engine.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    rng: &'a dyn RngOracle,
    loadout: &'a dyn LoadoutOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(rng: &'a dyn RngOracle, loadout: &'a dyn LoadoutOracle) -> Self {
        Self { rng, loadout }
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn loadout(&self) -> &'a dyn LoadoutOracle {
        self.loadout
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv").finish_non_exhaustive()
    }
}
