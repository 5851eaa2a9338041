use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::quantum::QuantumEngine;

/// Whether the round-start reveal is showing the true layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RevealWindow {
    /// Gate selection still running; nothing revealed yet.
    #[default]
    Pending,
    Open,
    Closed,
}

/// One load of the weapon.
///
/// A round owns its register outright; starting the next round builds a new
/// one, so no state carries over.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    /// 1-based round counter.
    pub number: u32,
    pub engine: QuantumEngine,
    pub reveal: RevealWindow,
    /// Shots fired so far in this round.
    pub turn_count: u32,
}

impl Round {
    /// Loads round `number` from the environment's loadout oracle.
    pub fn load(
        number: u32,
        config: &GameConfig,
        env: GameEnv<'_>,
        game_seed: u64,
        nonce: u64,
    ) -> Self {
        let layout = env
            .loadout()
            .load(config, env.rng(), game_seed, nonce, number);
        Self {
            number,
            engine: QuantumEngine::new(layout),
            reveal: RevealWindow::Pending,
            turn_count: 0,
        }
    }

    pub fn is_reveal_open(&self) -> bool {
        self.reveal == RevealWindow::Open
    }
}
