use buckshot_core::{
    FixedLoadout, GameConfig, GateKind, GateTarget, IntentKind, IntentOutcome, Outcome, PcgRng,
    PhaseKind, PlayerId, ShotTarget, VisibleStatus,
};
use buckshot_runtime::{
    ErrorKind, Event, GameEvent, GameSession, IntentEvent, PlayerSnapshot, PublicOutcome,
    RuntimeError, SessionConfig, SessionHandle, SnapshotEvent, Topic,
};

const B: Outcome = Outcome::Blank;
const L: Outcome = Outcome::Live;

fn session(layout: Vec<Outcome>, lives: u8) -> GameSession {
    let config = SessionConfig::default().with_seed(11).with_game(
        GameConfig::default()
            .with_bullet_count(layout.len())
            .with_initial_lives(lives),
    );
    let loadout = FixedLoadout::repeating(layout).expect("valid layout");
    GameSession::with_oracles(config, Box::new(PcgRng), Box::new(loadout)).expect("valid session")
}

fn start_actions(session: &mut GameSession) {
    session
        .select_gates(PlayerId::A, vec![GateKind::H, GateKind::X, GateKind::X])
        .expect("A selects");
    session
        .select_gates(PlayerId::B, vec![GateKind::Y, GateKind::Rz, GateKind::Cnot])
        .expect("B selects");
    session.reveal_ack().expect("reveal closes");
}

#[test]
fn invalid_config_is_refused() {
    let config = SessionConfig::default()
        .with_game(GameConfig::default().with_bullet_count(GameConfig::MAX_BULLETS + 1));
    let err = GameSession::new(config).expect_err("too many bullets");
    assert!(matches!(err, RuntimeError::Config(_)));
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn reveal_window_closes_after_configured_ticks() {
    let mut session = session(vec![L, B, B, L], 3);
    session
        .select_gates(PlayerId::A, vec![GateKind::H, GateKind::X, GateKind::X])
        .expect("A selects");
    session
        .select_gates(PlayerId::B, vec![GateKind::Y, GateKind::Rz, GateKind::Cnot])
        .expect("B selects");

    // Both players see the load while the window is open.
    for viewer in PlayerId::ALL {
        let statuses: Vec<_> = session
            .snapshot_for(viewer)
            .queue
            .iter()
            .map(|view| view.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                VisibleStatus::DefiniteLive,
                VisibleStatus::DefiniteBlank,
                VisibleStatus::DefiniteBlank,
                VisibleStatus::DefiniteLive,
            ]
        );
    }

    let ticks = session.state().config.reveal_window_ticks;
    for _ in 1..ticks {
        let update = session.reveal_tick().expect("tick accepted");
        assert!(matches!(update.outcome, IntentOutcome::RevealTicked { .. }));
    }
    let update = session.reveal_tick().expect("final tick");
    assert_eq!(update.outcome, IntentOutcome::RevealClosed);
    assert_eq!(update.snapshot, None);
    assert_eq!(session.state().current_player(), Some(PlayerId::A));
    assert!(session
        .snapshot_for(PlayerId::B)
        .queue
        .iter()
        .all(|view| view.status == VisibleStatus::Unknown));
}

#[test]
fn gate_knowledge_stays_with_its_author() {
    let mut session = session(vec![L, B, B, L], 3);
    start_actions(&mut session);

    let update = session
        .apply_gate(PlayerId::A, GateKind::H, GateTarget::Single(2))
        .expect("gate accepted");
    let own = update.snapshot.expect("submitter view");
    assert_eq!(own.queue[2].status, VisibleStatus::Superposed);
    assert_eq!(
        session.snapshot_for(PlayerId::B).queue[2].status,
        VisibleStatus::Unknown
    );
    assert_eq!(
        own.queue[1].status,
        VisibleStatus::Unknown
    );
}

#[test]
fn peek_is_once_per_round() {
    let mut session = session(vec![L, B, B, L], 3);
    start_actions(&mut session);

    let update = session.peek(PlayerId::A).expect("first peek");
    let snapshot = update.snapshot.expect("submitter view");
    assert_eq!(
        snapshot.peeked_gates,
        Some(vec![GateKind::Y, GateKind::Rz, GateKind::Cnot])
    );
    assert!(!snapshot.peek_available);
    assert_eq!(session.snapshot_for(PlayerId::B).peeked_gates, None);

    let err = session.peek(PlayerId::A).expect_err("second peek");
    assert_eq!(err.kind(), ErrorKind::PeekAlreadyUsed);

    // Peeking does not use up the turn.
    session
        .shoot(PlayerId::A, ShotTarget::Opponent)
        .expect("A still shoots");
}

#[test]
fn exhausted_gate_is_rejected_without_side_effects() {
    let mut session = session(vec![L, B, B, L], 3);
    start_actions(&mut session);
    let before = session.state().clone();

    let err = session
        .apply_gate(PlayerId::A, GateKind::Y, GateTarget::Single(0))
        .expect_err("Y was never selected");
    assert_eq!(err.kind(), ErrorKind::GateUnavailable);
    assert_eq!(session.state(), &before);

    let err = session
        .apply_gate(PlayerId::A, GateKind::X, GateTarget::Single(9))
        .expect_err("no such bullet");
    assert_eq!(err.kind(), ErrorKind::InvalidTarget);
    assert_eq!(session.state(), &before);
}

#[test]
fn one_gate_per_turn() {
    let mut session = session(vec![L, B, B, L], 3);
    start_actions(&mut session);

    session
        .apply_gate(PlayerId::A, GateKind::X, GateTarget::Single(0))
        .expect("first gate");
    let err = session
        .apply_gate(PlayerId::A, GateKind::X, GateTarget::Single(1))
        .expect_err("second gate in the same turn");
    assert_eq!(err.kind(), ErrorKind::IllegalIntent);
}

#[test]
fn out_of_turn_intents_are_illegal() {
    let mut session = session(vec![L, B, B, L], 3);
    start_actions(&mut session);

    let err = session
        .shoot(PlayerId::B, ShotTarget::Opponent)
        .expect_err("A acts first");
    assert_eq!(err.kind(), ErrorKind::IllegalIntent);
    assert_eq!(session.state().nonce, 3);
}

#[test]
fn wrong_selection_size_is_reported() {
    let mut session = session(vec![L, B, B, L], 3);
    let err = session
        .select_gates(PlayerId::A, vec![GateKind::X])
        .expect_err("three gates expected");
    assert_eq!(err.kind(), ErrorKind::InvalidGateSelection);
}

#[test]
fn busy_session_refuses_concurrent_intents() {
    let handle = SessionHandle::new(session(vec![L, B, B, L], 3));
    let inner = handle.clone();

    let nested = handle
        .with_session(|_| inner.submit(buckshot_core::Intent::RevealAck))
        .expect("outer lock acquired");
    let err = nested.expect_err("inner submission while locked");
    assert!(matches!(err, RuntimeError::SessionBusy));
    assert_eq!(err.kind(), ErrorKind::IllegalIntent);

    let snapshot = handle.snapshot_for(PlayerId::A).expect("lock released");
    assert_eq!(snapshot.turn_phase, PhaseKind::GateSelection);
}

#[test]
fn observers_receive_intent_and_game_events() {
    let handle = SessionHandle::new(session(vec![L, B, B, L], 1));
    let mut intents = handle.subscribe(Topic::Intent);
    let mut games = handle.subscribe(Topic::Game);
    let mut snapshots = handle.subscribe(Topic::Snapshot(PlayerId::A));

    let _ = handle.submit(buckshot_core::Intent::Shoot {
        player: PlayerId::A,
        target: ShotTarget::Opponent,
    });
    match intents.try_recv() {
        Ok(Event::Intent(IntentEvent::Rejected { intent, error_code, .. })) => {
            assert_eq!(intent, IntentKind::Shoot);
            assert_eq!(error_code, "INTENT_ILLEGAL");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }

    handle
        .with_session(start_actions)
        .expect("lock acquired");
    handle
        .submit(buckshot_core::Intent::Shoot {
            player: PlayerId::A,
            target: ShotTarget::Opponent,
        })
        .expect("winning shot");

    let accepted = std::iter::from_fn(|| intents.try_recv().ok())
        .filter(|event| matches!(event, Event::Intent(IntentEvent::Accepted { .. })))
        .count();
    assert_eq!(accepted, 4);
    assert!(matches!(
        games.try_recv(),
        Ok(Event::Game(GameEvent::Ended {
            winner: PlayerId::A,
            rounds_played: 1
        }))
    ));
    assert!(matches!(
        snapshots.try_recv(),
        Ok(Event::Snapshot(SnapshotEvent {
            viewer: PlayerId::A,
            ..
        }))
    ));
}

#[test]
fn peeked_gates_stay_as_they_were_at_peek_time() {
    let mut session = session(vec![L, B, B, L], 3);
    start_actions(&mut session);

    // A peeks, then a live opponent shot hands the turn to B.
    session.peek(PlayerId::A).expect("peek");
    session
        .shoot(PlayerId::A, ShotTarget::Opponent)
        .expect("A shoots");
    session
        .apply_gate(PlayerId::B, GateKind::Y, GateTarget::Single(1))
        .expect("B spends Y");

    let snapshot = session.snapshot_for(PlayerId::A);
    assert_eq!(
        snapshot.peeked_gates,
        Some(vec![GateKind::Y, GateKind::Rz, GateKind::Cnot])
    );
    assert_eq!(
        session.snapshot_for(PlayerId::B).own_gates,
        vec![GateKind::Rz, GateKind::Cnot]
    );
}

#[test]
fn submitting_never_exposes_the_opponents_hand() {
    let mut session = session(vec![L, B, B, L], 3);
    let mut intents = session.events().subscribe(Topic::Intent);
    let mut b_view = session.events().subscribe_viewer(PlayerId::B);
    start_actions(&mut session);

    let update = session
        .apply_gate(PlayerId::A, GateKind::H, GateTarget::Single(2))
        .expect("gate accepted");
    let own = update.snapshot.expect("submitter view");
    assert_eq!(own.viewer, PlayerId::A);
    assert_eq!(own.own_gates, vec![GateKind::X, GateKind::X]);
    assert_eq!(own.peeked_gates, None);

    // The shared topic says a gate went down, not which or where.
    let applied: Vec<_> = std::iter::from_fn(|| intents.try_recv().ok())
        .filter_map(|event| match event {
            Event::Intent(IntentEvent::Accepted {
                outcome: outcome @ PublicOutcome::GateApplied { .. },
                ..
            }) => Some(outcome),
            _ => None,
        })
        .collect();
    assert_eq!(
        applied,
        vec![PublicOutcome::GateApplied {
            player: PlayerId::A,
            sequence: 0
        }]
    );

    // B's own channel only ever carries B's view.
    let b_snapshots: Vec<_> = std::iter::from_fn(|| b_view.try_recv().ok())
        .filter_map(|event| match event {
            Event::Snapshot(event) => Some(event),
            _ => None,
        })
        .collect();
    assert!(b_snapshots.iter().all(|event| event.viewer == PlayerId::B));
    let latest = b_snapshots.last().expect("one per accepted intent");
    assert_eq!(latest.snapshot.own_gates, vec![GateKind::Y, GateKind::Rz, GateKind::Cnot]);
    assert_eq!(latest.snapshot.queue[2].status, VisibleStatus::Unknown);
}

#[test]
fn snapshots_serialize_to_json() {
    let mut session = session(vec![L, B, B, L], 3);
    start_actions(&mut session);
    session
        .apply_gate(PlayerId::A, GateKind::H, GateTarget::Single(0))
        .expect("gate accepted");

    let snapshot = session.snapshot_for(PlayerId::A);
    let json = serde_json::to_string(&snapshot).expect("serializable");
    assert!(json.contains("\"SUPERPOSED\""));
    assert!(json.contains("\"UNKNOWN\""));

    let back: PlayerSnapshot = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back, snapshot);
}
