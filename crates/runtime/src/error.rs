//! Unified error type surfaced by the session API.
//!
//! Wraps rule rejections from `buckshot-core` and adds the failures that only
//! exist once a session is shared (turn lock contention, poisoning).
use buckshot_core::{ConfigError, ErrorSeverity, GameError, IntentError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Intent(#[from] IntentError),

    #[error("invalid session configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("another intent is still being processed")]
    SessionBusy,

    #[error("session state was poisoned by a panic during an earlier intent")]
    SessionPoisoned,
}

/// Coarse error category a frontend reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidTarget,
    AlreadyMeasured,
    GateUnavailable,
    IllegalIntent,
    PeekAlreadyUsed,
    InvalidGateSelection,
    Config,
    Internal,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidTarget => "invalid_target",
            Self::AlreadyMeasured => "already_measured",
            Self::GateUnavailable => "gate_unavailable",
            Self::IllegalIntent => "illegal_intent",
            Self::PeekAlreadyUsed => "peek_already_used",
            Self::InvalidGateSelection => "invalid_gate_selection",
            Self::Config => "config",
            Self::Internal => "internal",
        }
    }
}

impl RuntimeError {
    /// Category of the rejection; a busy session counts as an illegal intent.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Intent(err) => match err {
                IntentError::InvalidTarget { .. } => ErrorKind::InvalidTarget,
                IntentError::AlreadyMeasured { .. } => ErrorKind::AlreadyMeasured,
                IntentError::GateUnavailable { .. } => ErrorKind::GateUnavailable,
                IntentError::IllegalIntent { .. } => ErrorKind::IllegalIntent,
                IntentError::PeekAlreadyUsed { .. } => ErrorKind::PeekAlreadyUsed,
                IntentError::InvalidGateSelection { .. } => ErrorKind::InvalidGateSelection,
                IntentError::PhaseTransition { .. } => ErrorKind::Internal,
            },
            Self::Config(_) => ErrorKind::Config,
            Self::SessionBusy => ErrorKind::IllegalIntent,
            Self::SessionPoisoned => ErrorKind::Internal,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Intent(err) => err.severity(),
            Self::Config(err) => err.severity(),
            Self::SessionBusy => ErrorSeverity::Recoverable,
            Self::SessionPoisoned => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Intent(err) => err.error_code(),
            Self::Config(err) => err.error_code(),
            Self::SessionBusy => "RUNTIME_SESSION_BUSY",
            Self::SessionPoisoned => "RUNTIME_SESSION_POISONED",
        }
    }
}
