//! Session configuration loaded from the environment.
use std::env;

use buckshot_core::GameConfig;

/// Settings for one game session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Rules the session is played under.
    pub game: GameConfig,
    /// Fixed game seed; `None` derives one from the system clock.
    pub seed: Option<u64>,
    /// Buffered events per topic before slow subscribers start lagging.
    pub event_capacity: usize,
}

impl SessionConfig {
    pub const DEFAULT_EVENT_CAPACITY: usize = 100;

    /// Construct session configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QBR_INITIAL_LIVES` - Lives per player (default: 3)
    /// - `QBR_BULLET_COUNT` - Bullets loaded per round (default: 6)
    /// - `QBR_MIN_LIVE_FRACTION` - Minimum share of LIVE bullets (default: 0.30)
    /// - `QBR_REVEAL_TICKS` - Reveal window length in ticks (default: 3)
    /// - `QBR_GATES_PER_PLAYER` - Gates each player selects per round (default: 3)
    /// - `QBR_SEED` - Game seed for reproducible sessions (default: clock)
    /// - `QBR_EVENT_CAPACITY` - Event bus capacity per topic (default: 100)
    ///
    /// Unparsable values fall back to the default. Out-of-range values are kept
    /// and rejected when the session is built.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(lives) = read_env::<u8>("QBR_INITIAL_LIVES") {
            config.game.initial_lives = lives;
        }
        if let Some(bullets) = read_env::<usize>("QBR_BULLET_COUNT") {
            config.game.bullet_count = bullets;
        }
        if let Some(fraction) = read_env::<f64>("QBR_MIN_LIVE_FRACTION") {
            config.game.min_live_fraction = fraction;
        }
        if let Some(ticks) = read_env::<u32>("QBR_REVEAL_TICKS") {
            config.game.reveal_window_ticks = ticks;
        }
        if let Some(gates) = read_env::<usize>("QBR_GATES_PER_PLAYER") {
            config.game.gates_per_player = gates;
        }
        config.seed = read_env::<u64>("QBR_SEED");
        if let Some(capacity) = read_env::<usize>("QBR_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }

        config
    }

    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: None,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
