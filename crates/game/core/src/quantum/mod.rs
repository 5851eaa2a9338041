//! Quantum state engine for the loaded bullets.
//!
//! Every bullet of a round is one qubit of a single dense register. Gates
//! mutate the joint state in place; firing a bullet is a projective
//! measurement that fixes its classical outcome and renormalizes the rest of
//! the register, which is how CNOT correlations reach partner bullets.
mod engine;
mod error;
mod gate;
mod register;

pub use engine::{Bullet, BulletStatus, GateRecord, QuantumEngine};
pub use error::{QuantumError, TargetReason};
pub use gate::{GateKind, GateTarget, Matrix2};
pub use register::{MarginalStatus, MeasurementDraw, QuantumRegister};

/// Probability mass within which a marginal counts as definite.
pub const DEFINITE_EPSILON: f64 = 1e-6;

/// Purity deficit below which a marginal counts as entangled.
pub const PURITY_EPSILON: f64 = 1e-6;
