//! Dense state-vector register.
//!
//! Amplitudes are stored little-endian: qubit `q` is bit `q` of the basis
//! index, so a register over `n` qubits holds `2^n` amplitudes.
use num_complex::Complex64;

use super::gate::Matrix2;
use super::{DEFINITE_EPSILON, PURITY_EPSILON};
use crate::env::{RngOracle, compute_seed, context};
use crate::state::Outcome;

/// Randomness consumed by a single measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementDraw {
    /// Uniform value in `[0, 1)` compared against the LIVE probability.
    pub sample: f64,
    /// Fair coin used when both outcomes are equally likely.
    pub coin: bool,
}

impl MeasurementDraw {
    pub const fn new(sample: f64, coin: bool) -> Self {
        Self { sample, coin }
    }

    /// Draws both values from the oracle with independent seeds.
    pub fn from_oracle(rng: &dyn RngOracle, game_seed: u64, nonce: u64, round: u32) -> Self {
        Self {
            sample: rng.unit_f64(compute_seed(
                game_seed,
                nonce,
                round,
                context::MEASURE_SAMPLE,
            )),
            coin: rng.coin(compute_seed(game_seed, nonce, round, context::MEASURE_COIN)),
        }
    }
}

/// Per-qubit classification derived from the reduced density matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarginalStatus {
    #[strum(to_string = "DEFINITE_LIVE")]
    DefiniteLive,
    #[strum(to_string = "DEFINITE_BLANK")]
    DefiniteBlank,
    #[strum(to_string = "SUPERPOSED")]
    Superposed,
    #[strum(to_string = "ENTANGLED")]
    Entangled,
}

impl MarginalStatus {
    pub const fn definite(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Live => Self::DefiniteLive,
            Outcome::Blank => Self::DefiniteBlank,
        }
    }
}

/// Joint quantum state of every bullet in a round.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantumRegister {
    qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl QuantumRegister {
    /// Computational basis state with bit `q` set iff bullet `q` is LIVE.
    pub fn from_layout(layout: &[Outcome]) -> Self {
        let qubits = layout.len();
        let basis = layout
            .iter()
            .enumerate()
            .fold(0usize, |acc, (q, outcome)| acc | (outcome.bit() << q));
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << qubits];
        amplitudes[basis] = Complex64::new(1.0, 0.0);
        Self { qubits, amplitudes }
    }

    /// Builds a register from raw amplitudes; the caller guarantees length 2^n.
    #[cfg(test)]
    pub(crate) fn from_amplitudes(qubits: usize, amplitudes: Vec<Complex64>) -> Self {
        assert_eq!(amplitudes.len(), 1 << qubits);
        Self { qubits, amplitudes }
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Total probability mass; 1 for every reachable state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Applies a single-qubit unitary to qubit `q`.
    pub(crate) fn apply_single(&mut self, q: usize, m: &Matrix2) {
        let mask = 1usize << q;
        for i in 0..self.amplitudes.len() {
            if i & mask != 0 {
                continue;
            }
            let j = i | mask;
            let (a0, a1) = (self.amplitudes[i], self.amplitudes[j]);
            self.amplitudes[i] = m[0][0] * a0 + m[0][1] * a1;
            self.amplitudes[j] = m[1][0] * a0 + m[1][1] * a1;
        }
    }

    /// Flips `target` on every basis state where `control` is set.
    pub(crate) fn apply_cnot(&mut self, control: usize, target: usize) {
        let cmask = 1usize << control;
        let tmask = 1usize << target;
        for i in 0..self.amplitudes.len() {
            if i & cmask != 0 && i & tmask == 0 {
                self.amplitudes.swap(i, i | tmask);
            }
        }
    }

    /// Probability that measuring qubit `q` yields LIVE.
    pub fn probability_live(&self, q: usize) -> f64 {
        let mask = 1usize << q;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Reduced single-qubit density matrix of qubit `q` (basis order BLANK, LIVE).
    pub fn reduced_density(&self, q: usize) -> Matrix2 {
        let mask = 1usize << q;
        let mut rho00 = 0.0;
        let mut rho11 = 0.0;
        let mut rho01 = Complex64::new(0.0, 0.0);
        for i in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            let a0 = self.amplitudes[i];
            let a1 = self.amplitudes[i | mask];
            rho00 += a0.norm_sqr();
            rho11 += a1.norm_sqr();
            rho01 += a0 * a1.conj();
        }
        [
            [Complex64::new(rho00, 0.0), rho01],
            [rho01.conj(), Complex64::new(rho11, 0.0)],
        ]
    }

    /// Tr(ρ²) of qubit `q`: 1 for a pure marginal, ½ when maximally mixed.
    pub fn purity(&self, q: usize) -> f64 {
        let rho = self.reduced_density(q);
        rho[0][0].re.powi(2) + rho[1][1].re.powi(2) + 2.0 * rho[0][1].norm_sqr()
    }

    /// Classifies qubit `q`; definite mass wins over purity.
    pub fn classify(&self, q: usize) -> MarginalStatus {
        let p_live = self.probability_live(q);
        if p_live >= 1.0 - DEFINITE_EPSILON {
            MarginalStatus::DefiniteLive
        } else if p_live <= DEFINITE_EPSILON {
            MarginalStatus::DefiniteBlank
        } else if self.purity(q) < 1.0 - PURITY_EPSILON {
            MarginalStatus::Entangled
        } else {
            MarginalStatus::Superposed
        }
    }

    /// Projective measurement of qubit `q`.
    ///
    /// Pure: returns the outcome and the renormalized post-measurement
    /// register, leaving `self` untouched.
    pub fn collapse(&self, q: usize, draw: MeasurementDraw) -> (Outcome, QuantumRegister) {
        let p_live = self.probability_live(q);
        let outcome = if p_live >= 1.0 - DEFINITE_EPSILON {
            Outcome::Live
        } else if p_live <= DEFINITE_EPSILON {
            Outcome::Blank
        } else if (p_live - 0.5).abs() <= DEFINITE_EPSILON {
            if draw.coin { Outcome::Live } else { Outcome::Blank }
        } else if draw.sample < p_live {
            Outcome::Live
        } else {
            Outcome::Blank
        };

        let mask = 1usize << q;
        let keep_set = outcome.is_live();
        let kept_mass = if keep_set { p_live } else { 1.0 - p_live };
        let scale = if kept_mass > 0.0 {
            1.0 / kept_mass.sqrt()
        } else {
            1.0
        };
        let amplitudes = self
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, a)| {
                if (i & mask != 0) == keep_set {
                    *a * scale
                } else {
                    Complex64::new(0.0, 0.0)
                }
            })
            .collect();

        (
            outcome,
            QuantumRegister {
                qubits: self.qubits,
                amplitudes,
            },
        )
    }
}
