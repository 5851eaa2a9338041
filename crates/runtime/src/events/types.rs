//! Event types for different topics.
//!
//! Only [`SnapshotEvent`] carries private knowledge, and it is routed to its
//! viewer's own topic. Everything on the shared topics is what both players
//! would see across the table.

use buckshot_core::{IntentKind, IntentOutcome, PlayerId, ShotReport};
use serde::{Deserialize, Serialize};

use crate::snapshot::PlayerSnapshot;

/// Table-visible part of an accepted intent.
///
/// Gate choices, gate targets and peeked pools never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicOutcome {
    GatesSelected { player: PlayerId, reveal_opened: bool },
    /// Someone applied a gate; which one and where stays with them.
    GateApplied { player: PlayerId, sequence: u32 },
    Shot(ShotReport),
    Peeked { player: PlayerId },
    RevealTicked { ticks_elapsed: u32 },
    RevealClosed,
}

impl From<&IntentOutcome> for PublicOutcome {
    fn from(outcome: &IntentOutcome) -> Self {
        match outcome {
            IntentOutcome::GatesSelected {
                player,
                reveal_opened,
            } => Self::GatesSelected {
                player: *player,
                reveal_opened: *reveal_opened,
            },
            IntentOutcome::GateApplied(record) => Self::GateApplied {
                player: record.player,
                sequence: record.sequence,
            },
            IntentOutcome::Shot(report) => Self::Shot(*report),
            IntentOutcome::Peeked { player, .. } => Self::Peeked { player: *player },
            IntentOutcome::RevealTicked { ticks_elapsed } => Self::RevealTicked {
                ticks_elapsed: *ticks_elapsed,
            },
            IntentOutcome::RevealClosed => Self::RevealClosed,
        }
    }
}

/// Events about submitted intents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IntentEvent {
    /// An intent was applied; `nonce` is the count after applying it.
    Accepted {
        intent: IntentKind,
        outcome: PublicOutcome,
        nonce: u64,
    },

    /// An intent was refused and the state left unchanged
    Rejected {
        intent: IntentKind,
        error_code: String,
        message: String,
    },
}

/// Round lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A fresh load is in the weapon and gate selection is open
    Started { round: u32 },
    /// The queue ran dry
    Ended { round: u32 },
}

/// Snapshot produced for one player after an accepted intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEvent {
    pub viewer: PlayerId,
    pub snapshot: Box<PlayerSnapshot>,
}

/// Game-level events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Ended { winner: PlayerId, rounds_played: u32 },
}
