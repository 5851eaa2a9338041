use arrayvec::ArrayVec;

use super::error::{QuantumError, TargetReason};
use super::gate::{GateKind, GateTarget};
use super::register::{MarginalStatus, MeasurementDraw, QuantumRegister};
use crate::config::GameConfig;
use crate::env::Loadout;
use crate::state::{BulletIndex, Outcome, PlayerId};

/// Lifecycle of a single bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BulletStatus {
    Unfired,
    Fired(Outcome),
}

/// A bullet in the load order, bound to the qubit with the same index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bullet {
    pub index: BulletIndex,
    pub status: BulletStatus,
}

impl Bullet {
    pub const fn qubit(&self) -> usize {
        self.index
    }

    pub const fn fired_outcome(&self) -> Option<Outcome> {
        match self.status {
            BulletStatus::Unfired => None,
            BulletStatus::Fired(outcome) => Some(outcome),
        }
    }

    pub const fn is_fired(&self) -> bool {
        matches!(self.status, BulletStatus::Fired(_))
    }
}

/// One gate application, kept for the rest of the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateRecord {
    /// Position in the round's application log, starting at 0.
    pub sequence: u32,
    pub player: PlayerId,
    pub gate: GateKind,
    pub target: GateTarget,
}

/// Owns the joint state of one round's bullets.
///
/// The register is replaced wholesale on measurement: collapse is computed
/// by [`QuantumRegister::collapse`] and the result swapped in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantumEngine {
    register: QuantumRegister,
    bullets: ArrayVec<Bullet, { GameConfig::MAX_BULLETS }>,
    records: Vec<GateRecord>,
    initial_layout: Loadout,
}

impl QuantumEngine {
    /// Loads a fresh register in the given classical layout.
    pub fn new(layout: Loadout) -> Self {
        let bullets = (0..layout.len())
            .map(|index| Bullet {
                index,
                status: BulletStatus::Unfired,
            })
            .collect();
        Self {
            register: QuantumRegister::from_layout(&layout),
            bullets,
            records: Vec::new(),
            initial_layout: layout,
        }
    }

    pub fn register(&self) -> &QuantumRegister {
        &self.register
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullet(&self, index: BulletIndex) -> Option<&Bullet> {
        self.bullets.get(index)
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    pub fn records(&self) -> &[GateRecord] {
        &self.records
    }

    /// Layout the round was loaded with, shown during the reveal window.
    pub fn initial_layout(&self) -> &[Outcome] {
        &self.initial_layout
    }

    /// First unfired bullet in load order.
    pub fn next_unfired(&self) -> Option<BulletIndex> {
        self.bullets
            .iter()
            .find(|bullet| !bullet.is_fired())
            .map(|bullet| bullet.index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_unfired().is_none()
    }

    /// Most recent gate application touching `bullet`, if any.
    pub fn last_record_for(&self, bullet: BulletIndex) -> Option<&GateRecord> {
        self.records
            .iter()
            .rev()
            .find(|record| record.target.touches(bullet))
    }

    /// Applies `gate` to unfired bullets and logs who did it.
    pub fn apply_gate(
        &mut self,
        player: PlayerId,
        gate: GateKind,
        target: GateTarget,
    ) -> Result<&GateRecord, QuantumError> {
        self.validate_target(gate, target)?;

        match (gate.matrix(), target) {
            (Some(matrix), GateTarget::Single(bullet)) => {
                self.register.apply_single(bullet, &matrix)
            }
            (None, GateTarget::Pair { control, target }) => {
                self.register.apply_cnot(control, target)
            }
            _ => {
                let first = target.bullets().next().unwrap_or_default();
                return Err(QuantumError::invalid(first, TargetReason::ArityMismatch));
            }
        }

        let sequence = self.records.len() as u32;
        self.records.push(GateRecord {
            sequence,
            player,
            gate,
            target,
        });
        Ok(&self.records[self.records.len() - 1])
    }

    /// Fires `bullet`, fixing its outcome and collapsing the register.
    pub fn measure(
        &mut self,
        bullet: BulletIndex,
        draw: MeasurementDraw,
    ) -> Result<Outcome, QuantumError> {
        let slot = self
            .bullets
            .get(bullet)
            .ok_or(QuantumError::invalid(bullet, TargetReason::OutOfRange))?;
        if let Some(outcome) = slot.fired_outcome() {
            return Err(QuantumError::AlreadyMeasured { bullet, outcome });
        }

        let (outcome, collapsed) = self.register.collapse(slot.qubit(), draw);
        self.register = collapsed;
        self.bullets[bullet].status = BulletStatus::Fired(outcome);
        Ok(outcome)
    }

    /// Classification of `bullet`; fired bullets report their fixed outcome.
    pub fn marginal_status(&self, bullet: BulletIndex) -> Result<MarginalStatus, QuantumError> {
        let slot = self
            .bullets
            .get(bullet)
            .ok_or(QuantumError::invalid(bullet, TargetReason::OutOfRange))?;
        Ok(match slot.fired_outcome() {
            Some(outcome) => MarginalStatus::definite(outcome),
            None => self.register.classify(slot.qubit()),
        })
    }

    fn validate_target(&self, gate: GateKind, target: GateTarget) -> Result<(), QuantumError> {
        let first = target.bullets().next().unwrap_or_default();
        if gate.arity() != target.arity() {
            return Err(QuantumError::invalid(first, TargetReason::ArityMismatch));
        }
        if let GateTarget::Pair { control, target } = target {
            if control == target {
                return Err(QuantumError::invalid(control, TargetReason::SameQubit));
            }
        }
        for bullet in target.bullets() {
            match self.bullets.get(bullet) {
                None => return Err(QuantumError::invalid(bullet, TargetReason::OutOfRange)),
                Some(slot) if slot.is_fired() => {
                    return Err(QuantumError::invalid(bullet, TargetReason::AlreadyFired));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
