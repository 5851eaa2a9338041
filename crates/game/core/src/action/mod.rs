//! Player intents and the results the engine reports for them.
//!
//! Intents are the only inbound surface of the rules: the runtime builds an
//! [`Intent`], hands it to [`crate::engine::TurnEngine::execute`], and gets an
//! [`IntentOutcome`] back on success.
use crate::quantum::{GateKind, GateRecord, GateTarget};
use crate::state::{BulletIndex, GatePool, Outcome, PlayerId};

/// Who a shot is aimed at, relative to the shooter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotTarget {
    #[strum(to_string = "self", serialize = "me", serialize = "shooter")]
    Shooter,
    #[strum(to_string = "opponent", serialize = "opp")]
    Opponent,
}

/// Something a player (or the external clock) asks the game to do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Pre-round pick of gates; repeats are allowed.
    SelectGates {
        player: PlayerId,
        gates: Vec<GateKind>,
    },
    /// Optional gate before the mandatory shot.
    ApplyGate {
        player: PlayerId,
        gate: GateKind,
        target: GateTarget,
    },
    Shoot {
        player: PlayerId,
        target: ShotTarget,
    },
    /// Look at the opponent's unused gates, once per round.
    Peek { player: PlayerId },
    /// Closes the reveal window immediately.
    RevealAck,
    /// One unit of the reveal window elapsed.
    RevealTick,
}

/// Fieldless mirror of [`Intent`] for logs and error reports.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentKind {
    SelectGates,
    ApplyGate,
    Shoot,
    Peek,
    RevealAck,
    RevealTick,
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::SelectGates { .. } => IntentKind::SelectGates,
            Self::ApplyGate { .. } => IntentKind::ApplyGate,
            Self::Shoot { .. } => IntentKind::Shoot,
            Self::Peek { .. } => IntentKind::Peek,
            Self::RevealAck => IntentKind::RevealAck,
            Self::RevealTick => IntentKind::RevealTick,
        }
    }

    /// Player submitting the intent; `None` for clock signals.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::SelectGates { player, .. }
            | Self::ApplyGate { player, .. }
            | Self::Shoot { player, .. }
            | Self::Peek { player } => Some(*player),
            Self::RevealAck | Self::RevealTick => None,
        }
    }
}

/// Everything that happened when a bullet was fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotReport {
    pub shooter: PlayerId,
    /// Player the barrel pointed at.
    pub target_player: PlayerId,
    pub bullet: BulletIndex,
    pub outcome: Outcome,
    /// A life was taken from `target_player`.
    pub damage_dealt: bool,
    /// The shooter keeps the turn (BLANK self-shot).
    pub extra_turn: bool,
    /// Lives `target_player` has left after the shot.
    pub target_lives: u8,
    /// The queue ran dry and a new round was loaded.
    pub round_ended: bool,
    pub winner: Option<PlayerId>,
}

/// Result of an accepted intent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentOutcome {
    GatesSelected {
        player: PlayerId,
        /// Both players have now submitted; the reveal window is open.
        reveal_opened: bool,
    },
    GateApplied(GateRecord),
    Shot(ShotReport),
    Peeked {
        player: PlayerId,
        opponent_gates: GatePool,
    },
    RevealTicked { ticks_elapsed: u32 },
    RevealClosed,
}
