//! Common error infrastructure for buckshot-core.
//!
//! Domain-specific errors (`QuantumError`, `IntentError`, `ConfigError`) are
//! defined next to the code that raises them. This module only provides the
//! shared classification every one of them implements.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player can retry with a different intent
/// - **Validation**: malformed input that must be changed before retrying
/// - **Internal**: unexpected state inconsistency that indicates a bug
/// - **Fatal**: the session cannot be created or continued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Wrong moment or exhausted resource; a different intent may succeed.
    ///
    /// Examples: not your turn, gate pool exhausted, peek already used
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: bullet index out of range, wrong selection size
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Unrecoverable, e.g. a configuration that prevents session creation.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all buckshot-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers; frontends match on them
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
