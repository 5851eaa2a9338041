//! Oracles deciding which bullets are loaded LIVE at the start of a round.
use arrayvec::ArrayVec;

use super::rng::{RngOracle, compute_seed, context};
use crate::config::{ConfigError, GameConfig};
use crate::state::Outcome;

/// Classical layout of a fresh round, in load order.
pub type Loadout = ArrayVec<Outcome, { GameConfig::MAX_BULLETS }>;

/// Supplies the live/blank layout for every new round.
pub trait LoadoutOracle: Send + Sync {
    /// Layout for `round` (1-based). Called only after [`Self::check`] passed
    /// for the same configuration.
    fn load(
        &self,
        config: &GameConfig,
        rng: &dyn RngOracle,
        game_seed: u64,
        nonce: u64,
        round: u32,
    ) -> Loadout;

    /// Verifies the oracle can serve layouts for `config`.
    fn check(&self, _config: &GameConfig) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Seeded random layouts honouring the configured live bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomLoadout;

impl LoadoutOracle for RandomLoadout {
    fn load(
        &self,
        config: &GameConfig,
        rng: &dyn RngOracle,
        game_seed: u64,
        nonce: u64,
        round: u32,
    ) -> Loadout {
        let n = config.bullet_count.min(GameConfig::MAX_BULLETS);
        let live = rng.range(
            compute_seed(game_seed, nonce, round, context::LOADOUT_COUNT),
            config.min_live_count() as u32,
            config.max_live_count() as u32,
        ) as usize;

        let mut layout: Loadout = (0..n)
            .map(|i| if i < live { Outcome::Live } else { Outcome::Blank })
            .collect();

        // Fisher-Yates
        for i in (1..n).rev() {
            let seed = compute_seed(game_seed, nonce, round, context::LOADOUT_SHUFFLE + i as u32);
            let j = rng.range(seed, 0, i as u32) as usize;
            layout.swap(i, j);
        }
        layout
    }
}

/// Scripted layouts, cycled when the game outlasts the script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedLoadout {
    rounds: Vec<Loadout>,
}

impl FixedLoadout {
    pub fn new(rounds: Vec<Vec<Outcome>>) -> Result<Self, ConfigError> {
        if rounds.is_empty() {
            return Err(ConfigError::EmptyLoadout);
        }
        let rounds = rounds
            .into_iter()
            .map(|layout| {
                let got = layout.len();
                Loadout::try_from(layout.as_slice()).map_err(|_| {
                    ConfigError::LoadoutSizeMismatch {
                        expected: GameConfig::MAX_BULLETS,
                        got,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rounds })
    }

    /// The same layout for every round.
    pub fn repeating(layout: Vec<Outcome>) -> Result<Self, ConfigError> {
        Self::new(vec![layout])
    }

    fn layout_for(&self, round: u32) -> &Loadout {
        let slot = (round.saturating_sub(1) as usize) % self.rounds.len();
        &self.rounds[slot]
    }
}

impl LoadoutOracle for FixedLoadout {
    fn load(
        &self,
        _config: &GameConfig,
        _rng: &dyn RngOracle,
        _game_seed: u64,
        _nonce: u64,
        round: u32,
    ) -> Loadout {
        self.layout_for(round).clone()
    }

    fn check(&self, config: &GameConfig) -> Result<(), ConfigError> {
        let min = config.min_live_count();
        for layout in &self.rounds {
            if layout.len() != config.bullet_count {
                return Err(ConfigError::LoadoutSizeMismatch {
                    expected: config.bullet_count,
                    got: layout.len(),
                });
            }
            let live = layout.iter().filter(|outcome| outcome.is_live()).count();
            if live < min {
                return Err(ConfigError::LoadoutTooFewLive { min, got: live });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn random_loads_respect_live_bounds() {
        let rng = PcgRng;
        for bullets in GameConfig::MIN_BULLETS..=GameConfig::MAX_BULLETS {
            let config = GameConfig::new().with_bullet_count(bullets);
            for round in 1..50 {
                let layout = RandomLoadout.load(&config, &rng, 99, 3, round);
                let live = layout.iter().filter(|o| o.is_live()).count();
                assert_eq!(layout.len(), bullets);
                assert!(live >= config.min_live_count(), "{bullets} bullets, {live} live");
                assert!(live <= config.max_live_count());
            }
        }
    }

    #[test]
    fn random_loads_are_reproducible() {
        let config = GameConfig::default();
        let first = RandomLoadout.load(&config, &PcgRng, 5, 0, 1);
        let again = RandomLoadout.load(&config, &PcgRng, 5, 0, 1);
        assert_eq!(first, again);
    }

    #[test]
    fn fixed_loadout_cycles_rounds() {
        use Outcome::{Blank as B, Live as L};
        let oracle = FixedLoadout::new(vec![vec![L, L, B, B], vec![B, L, L, B]]).expect("script");
        let config = GameConfig::new().with_bullet_count(4);
        assert_eq!(oracle.check(&config), Ok(()));
        assert_eq!(oracle.load(&config, &PcgRng, 0, 0, 1).as_slice(), &[L, L, B, B]);
        assert_eq!(oracle.load(&config, &PcgRng, 0, 0, 2).as_slice(), &[B, L, L, B]);
        assert_eq!(oracle.load(&config, &PcgRng, 0, 0, 3).as_slice(), &[L, L, B, B]);
    }

    #[test]
    fn fixed_loadout_is_checked_against_config() {
        use Outcome::{Blank as B, Live as L};
        let config = GameConfig::new().with_bullet_count(6);

        let short = FixedLoadout::repeating(vec![L, B, B, B]).expect("script");
        assert_eq!(
            short.check(&config),
            Err(ConfigError::LoadoutSizeMismatch {
                expected: 6,
                got: 4
            })
        );

        let sparse = FixedLoadout::repeating(vec![L, B, B, B, B, B]).expect("script");
        assert_eq!(
            sparse.check(&config),
            Err(ConfigError::LoadoutTooFewLive { min: 2, got: 1 })
        );

        assert_eq!(FixedLoadout::new(Vec::new()), Err(ConfigError::EmptyLoadout));
        assert!(FixedLoadout::repeating(vec![B; 11]).is_err());
    }
}
