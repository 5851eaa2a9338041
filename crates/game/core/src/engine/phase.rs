use crate::state::{PerPlayer, PlayerId};

/// Turn state machine.
///
/// `Resolving` and `RoundEnd` are transient: a shot passes through them and
/// leaves the state in `AwaitingAction`, `GateSelection` or `GameEnd` before
/// the intent returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    /// Waiting for both players to pick their gates.
    GateSelection { submitted: PerPlayer<bool> },
    /// True layout is on display for everyone.
    Reveal { ticks_elapsed: u32 },
    /// `player` may apply one gate, and must shoot.
    AwaitingAction { player: PlayerId, gate_applied: bool },
    /// A bullet fired by `player` is being measured.
    Resolving { player: PlayerId },
    RoundEnd,
    GameEnd { winner: PlayerId },
}

/// Fieldless mirror of [`TurnPhase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseKind {
    GateSelection,
    Reveal,
    AwaitingAction,
    Resolving,
    RoundEnd,
    GameEnd,
}

impl TurnPhase {
    /// Fresh selection phase with nobody submitted.
    pub const fn selection() -> Self {
        Self::GateSelection {
            submitted: PerPlayer::new(false, false),
        }
    }

    pub const fn kind(&self) -> PhaseKind {
        match self {
            Self::GateSelection { .. } => PhaseKind::GateSelection,
            Self::Reveal { .. } => PhaseKind::Reveal,
            Self::AwaitingAction { .. } => PhaseKind::AwaitingAction,
            Self::Resolving { .. } => PhaseKind::Resolving,
            Self::RoundEnd => PhaseKind::RoundEnd,
            Self::GameEnd { .. } => PhaseKind::GameEnd,
        }
    }

    /// Player expected to act, if the phase belongs to one.
    pub const fn acting_player(&self) -> Option<PlayerId> {
        match self {
            Self::AwaitingAction { player, .. } | Self::Resolving { player } => Some(*player),
            _ => None,
        }
    }

    /// Whether the state machine has an edge from `self` to `next`.
    pub fn can_transition_to(&self, next: &TurnPhase) -> bool {
        use PhaseKind::*;
        matches!(
            (self.kind(), next.kind()),
            (GateSelection, GateSelection)
                | (GateSelection, Reveal)
                | (Reveal, Reveal)
                | (Reveal, AwaitingAction)
                | (AwaitingAction, AwaitingAction)
                | (AwaitingAction, Resolving)
                | (Resolving, AwaitingAction)
                | (Resolving, RoundEnd)
                | (Resolving, GameEnd)
                | (RoundEnd, GateSelection)
        )
    }
}
