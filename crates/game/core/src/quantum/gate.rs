//! Gate catalogue and the unitaries behind it.
use core::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use num_complex::Complex64;

use crate::state::BulletIndex;

/// Row-major 2×2 complex matrix.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Gates a player may pick during selection and later apply to bullets.
///
/// Rotation gates are fixed at a quarter turn (π/2).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateKind {
    X,
    Y,
    Z,
    H,
    #[strum(to_string = "Rx(π/2)", serialize = "rx")]
    Rx,
    #[strum(to_string = "Ry(π/2)", serialize = "ry")]
    Ry,
    #[strum(to_string = "Rz(π/2)", serialize = "rz")]
    Rz,
    #[strum(to_string = "CNOT", serialize = "cx")]
    Cnot,
}

impl GateKind {
    /// Number of qubits the gate acts on.
    pub const fn arity(self) -> usize {
        match self {
            Self::Cnot => 2,
            _ => 1,
        }
    }

    /// Single-qubit unitary, or `None` for CNOT.
    pub fn matrix(self) -> Option<Matrix2> {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let m = match self {
            Self::X => [[ZERO, ONE], [ONE, ZERO]],
            Self::Y => [[ZERO, -I], [I, ZERO]],
            Self::Z => [[ONE, ZERO], [ZERO, -ONE]],
            Self::H => [[h, h], [h, -h]],
            // cos(π/4) = sin(π/4) = 1/√2
            Self::Rx => [[h, -I * FRAC_1_SQRT_2], [-I * FRAC_1_SQRT_2, h]],
            Self::Ry => [[h, -h], [h, h]],
            Self::Rz => [
                [Complex64::from_polar(1.0, -FRAC_PI_4), ZERO],
                [ZERO, Complex64::from_polar(1.0, FRAC_PI_4)],
            ],
            Self::Cnot => return None,
        };
        Some(m)
    }
}

/// Bullets a gate acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateTarget {
    Single(BulletIndex),
    Pair {
        control: BulletIndex,
        target: BulletIndex,
    },
}

impl GateTarget {
    pub const fn arity(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Pair { .. } => 2,
        }
    }

    /// Whether `bullet` is one of the qubits this target touches.
    pub const fn touches(&self, bullet: BulletIndex) -> bool {
        match *self {
            Self::Single(index) => index == bullet,
            Self::Pair { control, target } => control == bullet || target == bullet,
        }
    }

    pub fn bullets(&self) -> impl Iterator<Item = BulletIndex> {
        let (first, second) = match *self {
            Self::Single(index) => (index, None),
            Self::Pair { control, target } => (control, Some(target)),
        };
        core::iter::once(first).chain(second)
    }
}
