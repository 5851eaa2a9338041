//! Session-wide tunables and their validation.

use crate::error::{ErrorSeverity, GameError};

/// Game configuration constants and tunable parameters.
///
/// A configuration is checked once, when the game state is created; an
/// invalid one prevents the session from existing at all.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Lives each player starts the game with.
    pub initial_lives: u8,
    /// Bullets (and therefore qubits) loaded at the start of every round.
    pub bullet_count: usize,
    /// Lower bound on the share of LIVE bullets in a fresh load.
    pub min_live_fraction: f64,
    /// External clock units the round-start reveal stays open for.
    pub reveal_window_ticks: u32,
    /// Exact number of gate picks each player submits per round.
    pub gates_per_player: usize,
}

impl GameConfig {
    // ===== compile-time bounds =====
    pub const MIN_BULLETS: usize = 4;
    /// Upper bound on the register width; also the capacity of bullet lists.
    pub const MAX_BULLETS: usize = 10;
    pub const MIN_LIVES: u8 = 1;
    pub const MAX_LIVES: u8 = 5;
    pub const MIN_GATES_PER_PLAYER: usize = 1;
    pub const MAX_GATES_PER_PLAYER: usize = 6;
    /// Absorbs float noise so `10 * 0.3` counts as exactly 3.
    const FRACTION_SLACK: f64 = 1e-9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INITIAL_LIVES: u8 = 3;
    pub const DEFAULT_BULLET_COUNT: usize = 6;
    pub const DEFAULT_MIN_LIVE_FRACTION: f64 = 0.30;
    pub const DEFAULT_REVEAL_WINDOW_TICKS: u32 = 3;
    pub const DEFAULT_GATES_PER_PLAYER: usize = 3;

    pub fn new() -> Self {
        Self {
            initial_lives: Self::DEFAULT_INITIAL_LIVES,
            bullet_count: Self::DEFAULT_BULLET_COUNT,
            min_live_fraction: Self::DEFAULT_MIN_LIVE_FRACTION,
            reveal_window_ticks: Self::DEFAULT_REVEAL_WINDOW_TICKS,
            gates_per_player: Self::DEFAULT_GATES_PER_PLAYER,
        }
    }

    #[must_use]
    pub fn with_initial_lives(mut self, initial_lives: u8) -> Self {
        self.initial_lives = initial_lives;
        self
    }

    #[must_use]
    pub fn with_bullet_count(mut self, bullet_count: usize) -> Self {
        self.bullet_count = bullet_count;
        self
    }

    #[must_use]
    pub fn with_min_live_fraction(mut self, min_live_fraction: f64) -> Self {
        self.min_live_fraction = min_live_fraction;
        self
    }

    #[must_use]
    pub fn with_reveal_window_ticks(mut self, reveal_window_ticks: u32) -> Self {
        self.reveal_window_ticks = reveal_window_ticks;
        self
    }

    #[must_use]
    pub fn with_gates_per_player(mut self, gates_per_player: usize) -> Self {
        self.gates_per_player = gates_per_player;
        self
    }

    /// Checks every tunable against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_BULLETS..=Self::MAX_BULLETS).contains(&self.bullet_count) {
            return Err(ConfigError::BulletCountOutOfRange {
                got: self.bullet_count,
            });
        }
        if !(Self::MIN_LIVES..=Self::MAX_LIVES).contains(&self.initial_lives) {
            return Err(ConfigError::InitialLivesOutOfRange {
                got: self.initial_lives,
            });
        }
        if !(self.min_live_fraction > 0.0 && self.min_live_fraction < 1.0) {
            return Err(ConfigError::LiveFractionOutOfRange {
                got: self.min_live_fraction,
            });
        }
        if self.reveal_window_ticks == 0 {
            return Err(ConfigError::EmptyRevealWindow);
        }
        if !(Self::MIN_GATES_PER_PLAYER..=Self::MAX_GATES_PER_PLAYER)
            .contains(&self.gates_per_player)
        {
            return Err(ConfigError::GatesPerPlayerOutOfRange {
                got: self.gates_per_player,
            });
        }
        Ok(())
    }

    /// Smallest number of LIVE bullets a fresh load may contain.
    ///
    /// Rounded up so the configured fraction is a real guarantee
    /// (6 bullets at 30% means at least 2 live).
    pub fn min_live_count(&self) -> usize {
        let exact = self.bullet_count as f64 * self.min_live_fraction;
        let raw = (exact - Self::FRACTION_SLACK).ceil() as usize;
        raw.max(1).min(self.bullet_count.max(1))
    }

    /// Largest number of LIVE bullets a random load may contain.
    ///
    /// One blank is kept whenever the minimum allows it.
    pub fn max_live_count(&self) -> usize {
        self.bullet_count
            .saturating_sub(1)
            .max(self.min_live_count())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration rejected at session construction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "bullet count {got} is outside [{}, {}]",
        GameConfig::MIN_BULLETS,
        GameConfig::MAX_BULLETS
    )]
    BulletCountOutOfRange { got: usize },

    #[error(
        "initial lives {got} is outside [{}, {}]",
        GameConfig::MIN_LIVES,
        GameConfig::MAX_LIVES
    )]
    InitialLivesOutOfRange { got: u8 },

    #[error("minimum live fraction {got} must lie strictly between 0 and 1")]
    LiveFractionOutOfRange { got: f64 },

    #[error("reveal window must last at least one tick")]
    EmptyRevealWindow,

    #[error(
        "gates per player {got} is outside [{}, {}]",
        GameConfig::MIN_GATES_PER_PLAYER,
        GameConfig::MAX_GATES_PER_PLAYER
    )]
    GatesPerPlayerOutOfRange { got: usize },

    #[error("scripted loadout has {got} bullets, configuration expects {expected}")]
    LoadoutSizeMismatch { expected: usize, got: usize },

    #[error("scripted loadout has {got} live bullets, at least {min} are required")]
    LoadoutTooFewLive { min: usize, got: usize },

    #[error("scripted loadout contains no rounds")]
    EmptyLoadout,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            BulletCountOutOfRange { .. } => "CONFIG_BULLET_COUNT_OUT_OF_RANGE",
            InitialLivesOutOfRange { .. } => "CONFIG_INITIAL_LIVES_OUT_OF_RANGE",
            LiveFractionOutOfRange { .. } => "CONFIG_LIVE_FRACTION_OUT_OF_RANGE",
            EmptyRevealWindow => "CONFIG_EMPTY_REVEAL_WINDOW",
            GatesPerPlayerOutOfRange { .. } => "CONFIG_GATES_PER_PLAYER_OUT_OF_RANGE",
            LoadoutSizeMismatch { .. } => "CONFIG_LOADOUT_SIZE_MISMATCH",
            LoadoutTooFewLive { .. } => "CONFIG_LOADOUT_TOO_FEW_LIVE",
            EmptyLoadout => "CONFIG_EMPTY_LOADOUT",
        }
    }
}
