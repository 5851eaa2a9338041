//! Property-based tests for the quantum state engine using proptest
//!
//! Gate sequences are generated at random; normalization and measurement
//! permanence must hold for every one of them.

use buckshot_core::{
    GateKind, GateTarget, MarginalStatus, MeasurementDraw, Outcome, PlayerId, QuantumEngine,
    QuantumError,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

const SINGLE_QUBIT: [GateKind; 7] = [
    GateKind::X,
    GateKind::Y,
    GateKind::Z,
    GateKind::H,
    GateKind::Rx,
    GateKind::Ry,
    GateKind::Rz,
];

#[derive(Clone, Debug)]
enum Step {
    Single(GateKind, usize),
    Cnot(usize, usize),
}

fn layout_strategy() -> impl Strategy<Value = Vec<Outcome>> {
    prop::collection::vec(
        prop_oneof![Just(Outcome::Blank), Just(Outcome::Live)],
        4..=8,
    )
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (prop::sample::select(SINGLE_QUBIT.to_vec()), 0usize..8)
            .prop_map(|(gate, q)| Step::Single(gate, q)),
        (0usize..8, 0usize..8).prop_map(|(c, t)| Step::Cnot(c, t)),
    ]
}

fn player(i: usize) -> PlayerId {
    if i % 2 == 0 { PlayerId::A } else { PlayerId::B }
}

/// Applies `step`, ignoring targets the engine refuses.
fn apply(engine: &mut QuantumEngine, who: PlayerId, step: &Step) {
    let result = match *step {
        Step::Single(gate, q) => engine.apply_gate(who, gate, GateTarget::Single(q)).map(|_| ()),
        Step::Cnot(control, target) => engine
            .apply_gate(who, GateKind::Cnot, GateTarget::Pair { control, target })
            .map(|_| ()),
    };
    if let Err(err) = result {
        assert!(matches!(err, QuantumError::InvalidTarget { .. }), "{err}");
    }
}

proptest! {
    /// Property: the register stays normalized after any gate sequence
    #[test]
    fn gates_preserve_normalization(
        layout in layout_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..40)
    ) {
        let mut engine = QuantumEngine::new(layout.iter().copied().collect());
        for (i, step) in steps.iter().enumerate() {
            apply(&mut engine, player(i), step);
            prop_assert!((engine.register().norm_sqr() - 1.0).abs() < TOLERANCE);
        }
    }

    /// Property: measurement renormalizes and its outcome never changes
    #[test]
    fn measurement_is_permanent(
        layout in layout_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..20),
        sample in 0.0f64..1.0,
        coin in any::<bool>(),
        later in prop::collection::vec(step_strategy(), 0..10)
    ) {
        let mut engine = QuantumEngine::new(layout.iter().copied().collect());
        for (i, step) in steps.iter().enumerate() {
            apply(&mut engine, player(i), step);
        }

        let bullet = 0;
        let outcome = engine.measure(bullet, MeasurementDraw::new(sample, coin)).unwrap();
        prop_assert!((engine.register().norm_sqr() - 1.0).abs() < TOLERANCE);

        for (i, step) in later.iter().enumerate() {
            apply(&mut engine, player(i), step);
            prop_assert_eq!(
                engine.marginal_status(bullet).unwrap(),
                MarginalStatus::definite(outcome)
            );
        }

        prop_assert_eq!(
            engine.measure(bullet, MeasurementDraw::new(1.0 - sample, !coin)),
            Err(QuantumError::AlreadyMeasured { bullet, outcome })
        );
        prop_assert_eq!(engine.bullet(bullet).and_then(|b| b.fired_outcome()), Some(outcome));
    }

    /// Property: every unfired bullet's LIVE probability stays in [0, 1]
    #[test]
    fn marginals_are_probabilities(
        layout in layout_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..30)
    ) {
        let mut engine = QuantumEngine::new(layout.iter().copied().collect());
        for (i, step) in steps.iter().enumerate() {
            apply(&mut engine, player(i), step);
        }
        for q in 0..engine.bullet_count() {
            let p = engine.register().probability_live(q);
            prop_assert!((-TOLERANCE..=1.0 + TOLERANCE).contains(&p));
            let purity = engine.register().purity(q);
            prop_assert!(purity <= 1.0 + TOLERANCE && purity >= 0.5 - TOLERANCE);
        }
    }
}
