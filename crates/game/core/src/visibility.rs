//! Per-player projection of the bullet queue.
//!
//! Views are derived on demand from the single authoritative [`Round`] and
//! never stored, so the two players' knowledge cannot drift apart from the
//! engine or leak into each other.
//!
//! A player sees the true marginal of an unfired bullet only if they
//! authored the most recent gate touching it, or while the round-start
//! reveal window is open. Everything else unfired is [`VisibleStatus::Unknown`],
//! even bullets nobody has touched.
use crate::quantum::MarginalStatus;
use crate::state::{BulletIndex, Outcome, PlayerId, Round};

/// What a player is allowed to know about one bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum VisibleStatus {
    FiredLive,
    FiredBlank,
    DefiniteLive,
    DefiniteBlank,
    Superposed,
    Entangled,
    Unknown,
}

impl VisibleStatus {
    pub const fn fired(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Live => Self::FiredLive,
            Outcome::Blank => Self::FiredBlank,
        }
    }

    pub const fn is_fired(self) -> bool {
        matches!(self, Self::FiredLive | Self::FiredBlank)
    }
}

impl From<MarginalStatus> for VisibleStatus {
    fn from(status: MarginalStatus) -> Self {
        match status {
            MarginalStatus::DefiniteLive => Self::DefiniteLive,
            MarginalStatus::DefiniteBlank => Self::DefiniteBlank,
            MarginalStatus::Superposed => Self::Superposed,
            MarginalStatus::Entangled => Self::Entangled,
        }
    }
}

/// One entry of a player's queue view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BulletView {
    pub index: BulletIndex,
    pub status: VisibleStatus,
}

/// Builds `player`'s view of every bullet in load order.
pub fn view_for(player: PlayerId, round: &Round) -> Vec<BulletView> {
    let engine = &round.engine;
    let reveal_open = round.is_reveal_open();

    engine
        .bullets()
        .iter()
        .map(|bullet| {
            let status = match bullet.fired_outcome() {
                Some(outcome) => VisibleStatus::fired(outcome),
                None if reveal_open => engine.register().classify(bullet.qubit()).into(),
                None => match engine.last_record_for(bullet.index) {
                    Some(record) if record.player == player => {
                        engine.register().classify(bullet.qubit()).into()
                    }
                    _ => VisibleStatus::Unknown,
                },
            };
            BulletView {
                index: bullet.index,
                status,
            }
        })
        .collect()
}
