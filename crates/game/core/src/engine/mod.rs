//! Turn state machine and intent execution.
//!
//! The [`TurnEngine`] is the authoritative reducer for [`GameState`]. Every
//! intent runs against a scratch copy of the state, which replaces the real
//! one only when the handler succeeds, so a rejected intent never leaves a
//! partial change behind.

mod errors;
mod phase;
mod turns;

pub use errors::{IllegalReason, IntentError};
pub use phase::{PhaseKind, TurnPhase};

use crate::action::{Intent, IntentOutcome};
use crate::env::GameEnv;
use crate::state::GameState;

/// Applies intents to a borrowed [`GameState`].
pub struct TurnEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> TurnEngine<'a> {
    /// Creates a new engine over the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Validates and applies `intent`.
    ///
    /// On success the nonce advances by one; on failure the state is exactly
    /// what it was before the call.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        intent: &Intent,
    ) -> Result<IntentOutcome, IntentError> {
        let mut scratch = self.state.clone();
        let outcome = turns::dispatch(&mut scratch, env, intent)?;

        // Increment nonce after successful execution
        scratch.nonce += 1;
        *self.state = scratch;
        Ok(outcome)
    }
}
