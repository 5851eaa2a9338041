use crate::error::{ErrorSeverity, GameError};
use crate::state::{BulletIndex, Outcome};

/// Why a gate target was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetReason {
    #[strum(to_string = "index is out of range")]
    OutOfRange,
    #[strum(to_string = "bullet has already been fired")]
    AlreadyFired,
    #[strum(to_string = "control and target are the same bullet")]
    SameQubit,
    #[strum(to_string = "gate arity does not match the number of targets")]
    ArityMismatch,
}

/// Errors raised by the quantum state engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuantumError {
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
}

impl QuantumError {
    pub(crate) fn invalid(bullet: BulletIndex, reason: TargetReason) -> Self {
        Self::InvalidTarget { bullet, reason }
    }
}

impl GameError for QuantumError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget { .. } => "QUANTUM_INVALID_TARGET",
            Self::AlreadyMeasured { .. } => "QUANTUM_ALREADY_MEASURED",
        }
    }
}
