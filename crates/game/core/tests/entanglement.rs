//! Correlation and round isolation through the public engine API.

use buckshot_core::{
    FixedLoadout, GameConfig, GameEnv, GameState, GateKind, GateTarget, Intent, IntentOutcome,
    MarginalStatus, MeasurementDraw, Outcome, PcgRng, PlayerId, QuantumEngine, QuantumRegister,
    ShotTarget, TurnEngine, TurnPhase,
};
use buckshot_core::Outcome::{Blank as B, Live as L};

fn bell_engine(partner: Outcome) -> QuantumEngine {
    let mut engine = QuantumEngine::new([B, partner, B, B].into_iter().collect());
    engine
        .apply_gate(PlayerId::A, GateKind::H, GateTarget::Single(0))
        .unwrap();
    engine
        .apply_gate(
            PlayerId::A,
            GateKind::Cnot,
            GateTarget::Pair {
                control: 0,
                target: 1,
            },
        )
        .unwrap();
    engine
}

#[test]
fn live_control_flips_partner_relative_to_its_load() {
    for partner in [B, L] {
        let mut engine = bell_engine(partner);
        assert_eq!(engine.marginal_status(1).unwrap(), MarginalStatus::Entangled);

        let control = engine.measure(0, MeasurementDraw::new(0.0, true)).unwrap();
        assert_eq!(control, L);
        let flipped = if partner == L { B } else { L };
        assert_eq!(
            engine.marginal_status(1).unwrap(),
            MarginalStatus::definite(flipped)
        );
        assert_eq!(engine.measure(1, MeasurementDraw::new(0.99, false)).unwrap(), flipped);
    }
}

#[test]
fn blank_control_leaves_partner_as_loaded() {
    let mut engine = bell_engine(L);
    let control = engine.measure(0, MeasurementDraw::new(0.0, false)).unwrap();
    assert_eq!(control, B);
    assert_eq!(engine.measure(1, MeasurementDraw::new(0.0, true)).unwrap(), L);
}

#[test]
fn outcomes_are_correlated_over_many_seeds() {
    let rng = PcgRng;
    for nonce in 0..200 {
        let mut engine = bell_engine(B);
        let first = engine
            .measure(0, MeasurementDraw::from_oracle(&rng, 42, nonce, 1))
            .unwrap();
        let second = engine
            .measure(1, MeasurementDraw::from_oracle(&rng, 42, nonce + 1000, 1))
            .unwrap();
        assert_eq!(first, second, "bell pair decorrelated at nonce {nonce}");
    }
}

#[test]
fn next_round_starts_from_its_own_layout() {
    let config = GameConfig::new()
        .with_bullet_count(4)
        .with_gates_per_player(2)
        .with_initial_lives(5);
    let loadout = FixedLoadout::new(vec![vec![B, L, B, L], vec![L, L, B, B]]).unwrap();
    let rng = PcgRng;
    let env = GameEnv::new(&rng, &loadout);
    let mut state = GameState::new(config, 3, env).unwrap();

    let submit = |state: &mut GameState, intent: Intent| {
        TurnEngine::new(state).execute(env, &intent).unwrap()
    };

    for player in PlayerId::ALL {
        submit(
            &mut state,
            Intent::SelectGates {
                player,
                gates: vec![GateKind::H, GateKind::Cnot],
            },
        );
    }
    submit(&mut state, Intent::RevealAck);
    submit(
        &mut state,
        Intent::ApplyGate {
            player: PlayerId::A,
            gate: GateKind::H,
            target: GateTarget::Single(2),
        },
    );

    let mut shooter = PlayerId::A;
    let mut round_ended = false;
    while !round_ended {
        let outcome = submit(
            &mut state,
            Intent::Shoot {
                player: shooter,
                target: ShotTarget::Opponent,
            },
        );
        let IntentOutcome::Shot(report) = outcome else {
            panic!("expected a shot report, got {outcome:?}");
        };
        round_ended = report.round_ended;
        shooter = shooter.opponent();
    }

    assert_eq!(state.round.number, 2);
    assert_eq!(state.phase, TurnPhase::selection());
    assert_eq!(
        state.round.engine.register(),
        &QuantumRegister::from_layout(&[L, L, B, B])
    );
    assert_eq!(state.round.engine.initial_layout(), &[L, L, B, B]);
    assert!(state.round.engine.records().is_empty());
}
