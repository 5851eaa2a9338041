//! Deterministic rules for quantum buckshot roulette.
//!
//! `buckshot-core` defines the canonical game: a shared weapon whose bullets
//! are qubits in a joint state, two players who manipulate that state with
//! gates before firing, and a turn state machine that decides who acts next.
//! It exposes pure APIs that are reused by the runtime and by offline tools.
//! All state mutation flows through [`engine::TurnEngine`], randomness and
//! bullet layouts arrive through the oracles in [`env`], and per-player
//! knowledge is derived on demand by [`visibility`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod quantum;
pub mod state;
pub mod visibility;

pub use action::{Intent, IntentKind, IntentOutcome, ShotReport, ShotTarget};
pub use config::{ConfigError, GameConfig};
pub use engine::{IllegalReason, IntentError, PhaseKind, TurnEngine, TurnPhase};
pub use env::{
    FixedLoadout, GameEnv, Loadout, LoadoutOracle, PcgRng, RandomLoadout, RngOracle, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use quantum::{
    Bullet, BulletStatus, GateKind, GateRecord, GateTarget, MarginalStatus, MeasurementDraw,
    QuantumEngine, QuantumError, QuantumRegister, TargetReason,
};
pub use state::{
    BulletIndex, GameState, GatePool, GameStatus, Outcome, PerPlayer, PlayerId, PlayerState,
    RevealWindow, Round,
};
pub use visibility::{BulletView, VisibleStatus, view_for};
