//! Authoritative game state representation.
//!
//! This module owns the players, the current round and its quantum engine,
//! and the turn phase. Runtime layers clone or query this state but mutate it
//! exclusively through the engine.
mod player;
mod round;
mod types;

pub use player::{GatePool, PlayerState};
pub use round::{RevealWindow, Round};
pub use types::{BulletIndex, GameStatus, Outcome, PerPlayer, PlayerId};

use crate::config::{ConfigError, GameConfig};
use crate::engine::TurnPhase;
use crate::env::GameEnv;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `nonce` to generate unique seeds for each random event.
    pub game_seed: u64,

    /// Number of accepted intents so far.
    pub nonce: u64,

    pub config: GameConfig,
    pub players: PerPlayer<PlayerState>,
    pub round: Round,
    pub phase: TurnPhase,
    pub status: GameStatus,
}

impl GameState {
    /// Validates `config` and loads the first round.
    pub fn new(config: GameConfig, game_seed: u64, env: GameEnv<'_>) -> Result<Self, ConfigError> {
        config.validate()?;
        env.loadout().check(&config)?;

        let round = Round::load(1, &config, env, game_seed, 0);
        let players = PerPlayer::from_fn(|id| PlayerState::new(id, config.initial_lives));
        Ok(Self {
            game_seed,
            nonce: 0,
            config,
            players,
            round,
            phase: TurnPhase::selection(),
            status: GameStatus::InProgress,
        })
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id]
    }

    pub fn lives(&self) -> PerPlayer<u8> {
        PerPlayer::from_fn(|id| self.players[id].lives)
    }

    /// Player whose action the engine is waiting for, if any.
    pub fn current_player(&self) -> Option<PlayerId> {
        self.phase.acting_player()
    }
}
