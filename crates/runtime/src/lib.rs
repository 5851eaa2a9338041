//! Session orchestration for quantum buckshot roulette.
//!
//! This crate wires the deterministic rules of `buckshot-core` into a game
//! session that a frontend can drive. Consumers build a [`GameSession`] (or
//! share one through a [`SessionHandle`]), submit intents, and render the
//! per-player [`PlayerSnapshot`]s that come back.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns the state and oracles and applies intents
//! - [`handle`] enforces the one-intent-at-a-time turn lock
//! - [`snapshot`] builds the outbound per-player view model
//! - [`events`] provides a topic-based event bus for observers
//! - [`config`] loads session settings from the environment
pub mod config;
pub mod error;
pub mod events;
pub mod handle;
pub mod session;
pub mod snapshot;

pub use config::SessionConfig;
pub use error::{ErrorKind, Result, RuntimeError};
pub use events::{
    Event, EventBus, GameEvent, IntentEvent, PublicOutcome, RoundEvent, SnapshotEvent, Topic,
};
pub use handle::SessionHandle;
pub use session::{GameSession, SessionUpdate};
pub use snapshot::PlayerSnapshot;
