//! Small identifiers and value types shared across the state tree.
use core::ops::{Index, IndexMut};

/// Position of a bullet in the load order; also the qubit it is bound to.
pub type BulletIndex = usize;

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    #[strum(to_string = "Player A")]
    A,
    #[strum(to_string = "Player B")]
    B,
}

impl PlayerId {
    /// Both players in seating order.
    pub const ALL: [PlayerId; 2] = [PlayerId::A, PlayerId::B];

    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub const fn as_u32(self) -> u32 {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Classical result of firing a bullet.
///
/// `Live` corresponds to the computational basis state |1⟩, `Blank` to |0⟩.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    #[strum(to_string = "BLANK")]
    Blank,
    #[strum(to_string = "LIVE")]
    Live,
}

impl Outcome {
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }

    /// Basis bit this outcome corresponds to.
    pub const fn bit(self) -> usize {
        match self {
            Self::Blank => 0,
            Self::Live => 1,
        }
    }
}

/// Overall state of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    #[default]
    InProgress,
    PlayerAWon,
    PlayerBWon,
}

impl GameStatus {
    pub const fn won_by(player: PlayerId) -> Self {
        match player {
            PlayerId::A => Self::PlayerAWon,
            PlayerId::B => Self::PlayerBWon,
        }
    }

    pub const fn winner(self) -> Option<PlayerId> {
        match self {
            Self::InProgress => None,
            Self::PlayerAWon => Some(PlayerId::A),
            Self::PlayerBWon => Some(PlayerId::B),
        }
    }

    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A value held once per player, indexable by [`PlayerId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerPlayer<T> {
    pub a: T,
    pub b: T,
}

impl<T> PerPlayer<T> {
    pub const fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn from_fn(mut f: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            a: f(PlayerId::A),
            b: f(PlayerId::B),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(PlayerId, T) -> U) -> PerPlayer<U> {
        PerPlayer {
            a: f(PlayerId::A, self.a),
            b: f(PlayerId::B, self.b),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        [(PlayerId::A, &self.a), (PlayerId::B, &self.b)].into_iter()
    }
}

impl<T> Index<PlayerId> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        match player {
            PlayerId::A => &self.a,
            PlayerId::B => &self.b,
        }
    }
}

impl<T> IndexMut<PlayerId> for PerPlayer<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        match player {
            PlayerId::A => &mut self.a,
            PlayerId::B => &mut self.b,
        }
    }
}
