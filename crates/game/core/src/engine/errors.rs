//! Error types for intent execution.

use super::phase::PhaseKind;
use crate::action::IntentKind;
use crate::error::{ErrorSeverity, GameError};
use crate::quantum::{GateKind, QuantumError, TargetReason};
use crate::state::{BulletIndex, Outcome, PlayerId};

/// Why an intent is not legal right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalReason {
    #[strum(to_string = "not accepted in this phase")]
    WrongPhase,
    #[strum(to_string = "it is the other player's turn")]
    NotYourTurn,
    #[strum(to_string = "gates were already selected this round")]
    AlreadySubmitted,
    #[strum(to_string = "a gate was already applied this turn")]
    GateAlreadyApplied,
    #[strum(to_string = "the game is over")]
    GameOver,
    #[strum(to_string = "no unfired bullet is left")]
    QueueEmpty,
}

/// Rejections surfaced while executing an intent.
///
/// Every rejection leaves the game state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentError {
    #[error("invalid target bullet {bullet}: {reason}")]
    InvalidTarget {
        bullet: BulletIndex,
        reason: TargetReason,
    },

    #[error("bullet {bullet} was already fired ({outcome})")]
    AlreadyMeasured {
        bullet: BulletIndex,
        outcome: Outcome,
    },

    #[error("{player} has no {gate} gate left this round")]
    GateUnavailable { player: PlayerId, gate: GateKind },

    #[error("illegal {intent} during {phase}: {reason}")]
    IllegalIntent {
        intent: IntentKind,
        phase: PhaseKind,
        reason: IllegalReason,
    },

    #[error("{player} already peeked this round")]
    PeekAlreadyUsed { player: PlayerId },

    #[error("gate selection must contain exactly {expected} gates (got {got})")]
    InvalidGateSelection { expected: usize, got: usize },

    #[error("turn phase cannot move from {from} to {to}")]
    PhaseTransition { from: PhaseKind, to: PhaseKind },
}

impl IntentError {
    pub(crate) fn illegal(intent: IntentKind, phase: PhaseKind, reason: IllegalReason) -> Self {
        Self::IllegalIntent {
            intent,
            phase,
            reason,
        }
    }
}

impl From<QuantumError> for IntentError {
    fn from(err: QuantumError) -> Self {
        match err {
            QuantumError::InvalidTarget { bullet, reason } => Self::InvalidTarget { bullet, reason },
            QuantumError::AlreadyMeasured { bullet, outcome } => {
                Self::AlreadyMeasured { bullet, outcome }
            }
        }
    }
}

impl GameError for IntentError {
    fn severity(&self) -> ErrorSeverity {
        use IntentError::*;
        match self {
            InvalidTarget { .. } | AlreadyMeasured { .. } | InvalidGateSelection { .. } => {
                ErrorSeverity::Validation
            }
            GateUnavailable { .. } | IllegalIntent { .. } | PeekAlreadyUsed { .. } => {
                ErrorSeverity::Recoverable
            }
            PhaseTransition { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use IntentError::*;
        match self {
            InvalidTarget { .. } => "INTENT_INVALID_TARGET",
            AlreadyMeasured { .. } => "INTENT_ALREADY_MEASURED",
            GateUnavailable { .. } => "INTENT_GATE_UNAVAILABLE",
            IllegalIntent { .. } => "INTENT_ILLEGAL",
            PeekAlreadyUsed { .. } => "INTENT_PEEK_ALREADY_USED",
            InvalidGateSelection { .. } => "INTENT_INVALID_GATE_SELECTION",
            PhaseTransition { .. } => "INTENT_PHASE_TRANSITION",
        }
    }
}
