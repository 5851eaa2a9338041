use arrayvec::ArrayVec;

use super::types::PlayerId;
use crate::config::GameConfig;
use crate::quantum::GateKind;

/// Multiset of gates a player picked for the current round.
///
/// Entries keep their selection order; applying a gate consumes the first
/// matching entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatePool {
    entries: ArrayVec<GateKind, { GameConfig::MAX_GATES_PER_PLAYER }>,
}

impl GatePool {
    /// Builds a pool from a selection, or `None` if it exceeds capacity.
    pub fn from_selection(gates: &[GateKind]) -> Option<Self> {
        ArrayVec::try_from(gates).ok().map(|entries| Self { entries })
    }

    pub fn count(&self, gate: GateKind) -> usize {
        self.entries.iter().filter(|&&entry| entry == gate).count()
    }

    pub fn contains(&self, gate: GateKind) -> bool {
        self.entries.contains(&gate)
    }

    /// Removes one `gate`, returning false when none is left.
    pub fn take(&mut self, gate: GateKind) -> bool {
        match self.entries.iter().position(|&entry| entry == gate) {
            Some(slot) => {
                self.entries.remove(slot);
                true
            }
            None => false,
        }
    }

    /// Unused entries in selection order.
    pub fn remaining(&self) -> &[GateKind] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Per-player bookkeeping that survives across turns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    pub lives: u8,
    /// Gates still available this round.
    pub gates: GatePool,
    /// Set once the player has peeked this round.
    pub peek_used: bool,
    /// Opponent's unused gates as seen at peek time.
    pub peek_result: Option<GatePool>,
}

impl PlayerState {
    pub fn new(id: PlayerId, lives: u8) -> Self {
        Self {
            id,
            lives,
            gates: GatePool::default(),
            peek_used: false,
            peek_result: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Removes one life and returns what is left.
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Clears everything scoped to a single round.
    pub fn reset_for_round(&mut self) {
        self.gates.clear();
        self.peek_used = false;
        self.peek_result = None;
    }
}
