//! Intent handlers.
//!
//! Each handler checks legality against the current [`TurnPhase`] first and
//! only then mutates the (scratch) state, moving between phases through
//! [`transition`] so every edge is checked against the state machine.

use super::errors::{IllegalReason, IntentError};
use super::phase::TurnPhase;
use crate::action::{Intent, IntentKind, IntentOutcome, ShotReport, ShotTarget};
use crate::env::GameEnv;
use crate::quantum::{GateKind, GateTarget, MeasurementDraw};
use crate::state::{GatePool, GameState, GameStatus, PlayerId, RevealWindow, Round};

pub(super) fn dispatch(
    state: &mut GameState,
    env: GameEnv<'_>,
    intent: &Intent,
) -> Result<IntentOutcome, IntentError> {
    if state.status.is_over() {
        return Err(IntentError::illegal(
            intent.kind(),
            state.phase.kind(),
            IllegalReason::GameOver,
        ));
    }

    match intent {
        Intent::SelectGates { player, gates } => select_gates(state, *player, gates),
        Intent::ApplyGate {
            player,
            gate,
            target,
        } => apply_gate(state, *player, *gate, *target),
        Intent::Shoot { player, target } => shoot(state, env, *player, *target),
        Intent::Peek { player } => peek(state, *player),
        Intent::RevealAck => reveal_ack(state),
        Intent::RevealTick => reveal_tick(state),
    }
}

fn transition(state: &mut GameState, next: TurnPhase) -> Result<(), IntentError> {
    if !state.phase.can_transition_to(&next) {
        return Err(IntentError::PhaseTransition {
            from: state.phase.kind(),
            to: next.kind(),
        });
    }
    state.phase = next;
    Ok(())
}

/// Confirms `player` owns the current action phase; returns whether a gate
/// was already applied this turn.
fn expect_turn(
    state: &GameState,
    intent: IntentKind,
    player: PlayerId,
) -> Result<bool, IntentError> {
    match state.phase {
        TurnPhase::AwaitingAction {
            player: current,
            gate_applied,
        } => {
            if current == player {
                Ok(gate_applied)
            } else {
                Err(IntentError::illegal(
                    intent,
                    state.phase.kind(),
                    IllegalReason::NotYourTurn,
                ))
            }
        }
        _ => Err(IntentError::illegal(
            intent,
            state.phase.kind(),
            IllegalReason::WrongPhase,
        )),
    }
}

fn select_gates(
    state: &mut GameState,
    player: PlayerId,
    gates: &[GateKind],
) -> Result<IntentOutcome, IntentError> {
    let TurnPhase::GateSelection { mut submitted } = state.phase else {
        return Err(IntentError::illegal(
            IntentKind::SelectGates,
            state.phase.kind(),
            IllegalReason::WrongPhase,
        ));
    };
    if submitted[player] {
        return Err(IntentError::illegal(
            IntentKind::SelectGates,
            state.phase.kind(),
            IllegalReason::AlreadySubmitted,
        ));
    }

    let expected = state.config.gates_per_player;
    let invalid = IntentError::InvalidGateSelection {
        expected,
        got: gates.len(),
    };
    if gates.len() != expected {
        return Err(invalid);
    }
    state.players[player].gates = GatePool::from_selection(gates).ok_or(invalid)?;
    submitted[player] = true;

    let reveal_opened = submitted.a && submitted.b;
    if reveal_opened {
        transition(state, TurnPhase::Reveal { ticks_elapsed: 0 })?;
        state.round.reveal = RevealWindow::Open;
    } else {
        transition(state, TurnPhase::GateSelection { submitted })?;
    }
    Ok(IntentOutcome::GatesSelected {
        player,
        reveal_opened,
    })
}

fn reveal_tick(state: &mut GameState) -> Result<IntentOutcome, IntentError> {
    let TurnPhase::Reveal { ticks_elapsed } = state.phase else {
        return Err(IntentError::illegal(
            IntentKind::RevealTick,
            state.phase.kind(),
            IllegalReason::WrongPhase,
        ));
    };
    let ticks_elapsed = ticks_elapsed + 1;
    if ticks_elapsed >= state.config.reveal_window_ticks {
        close_reveal(state)?;
        return Ok(IntentOutcome::RevealClosed);
    }
    transition(state, TurnPhase::Reveal { ticks_elapsed })?;
    Ok(IntentOutcome::RevealTicked { ticks_elapsed })
}

fn reveal_ack(state: &mut GameState) -> Result<IntentOutcome, IntentError> {
    if !matches!(state.phase, TurnPhase::Reveal { .. }) {
        return Err(IntentError::illegal(
            IntentKind::RevealAck,
            state.phase.kind(),
            IllegalReason::WrongPhase,
        ));
    }
    close_reveal(state)?;
    Ok(IntentOutcome::RevealClosed)
}

/// Player A opens every round.
fn close_reveal(state: &mut GameState) -> Result<(), IntentError> {
    transition(
        state,
        TurnPhase::AwaitingAction {
            player: PlayerId::A,
            gate_applied: false,
        },
    )?;
    state.round.reveal = RevealWindow::Closed;
    Ok(())
}

fn apply_gate(
    state: &mut GameState,
    player: PlayerId,
    gate: GateKind,
    target: GateTarget,
) -> Result<IntentOutcome, IntentError> {
    if expect_turn(state, IntentKind::ApplyGate, player)? {
        return Err(IntentError::illegal(
            IntentKind::ApplyGate,
            state.phase.kind(),
            IllegalReason::GateAlreadyApplied,
        ));
    }
    if !state.players[player].gates.contains(gate) {
        return Err(IntentError::GateUnavailable { player, gate });
    }

    let record = *state.round.engine.apply_gate(player, gate, target)?;
    state.players[player].gates.take(gate);
    transition(
        state,
        TurnPhase::AwaitingAction {
            player,
            gate_applied: true,
        },
    )?;
    Ok(IntentOutcome::GateApplied(record))
}

fn peek(state: &mut GameState, player: PlayerId) -> Result<IntentOutcome, IntentError> {
    expect_turn(state, IntentKind::Peek, player)?;
    if state.players[player].peek_used {
        return Err(IntentError::PeekAlreadyUsed { player });
    }

    let opponent_gates = state.players[player.opponent()].gates.clone();
    let peeker = &mut state.players[player];
    peeker.peek_used = true;
    peeker.peek_result = Some(opponent_gates.clone());
    Ok(IntentOutcome::Peeked {
        player,
        opponent_gates,
    })
}

fn shoot(
    state: &mut GameState,
    env: GameEnv<'_>,
    player: PlayerId,
    target: ShotTarget,
) -> Result<IntentOutcome, IntentError> {
    expect_turn(state, IntentKind::Shoot, player)?;
    let bullet = state.round.engine.next_unfired().ok_or(IntentError::illegal(
        IntentKind::Shoot,
        state.phase.kind(),
        IllegalReason::QueueEmpty,
    ))?;
    transition(state, TurnPhase::Resolving { player })?;

    let draw = MeasurementDraw::from_oracle(
        env.rng(),
        state.game_seed,
        state.nonce,
        state.round.number,
    );
    let outcome = state.round.engine.measure(bullet, draw)?;
    state.round.turn_count += 1;

    let target_player = match target {
        ShotTarget::Shooter => player,
        ShotTarget::Opponent => player.opponent(),
    };
    let damage_dealt = outcome.is_live();
    let target_lives = if damage_dealt {
        state.players[target_player].lose_life()
    } else {
        state.players[target_player].lives
    };
    let extra_turn = target == ShotTarget::Shooter && !damage_dealt;

    let mut report = ShotReport {
        shooter: player,
        target_player,
        bullet,
        outcome,
        damage_dealt,
        extra_turn,
        target_lives,
        round_ended: false,
        winner: None,
    };

    if let Some(winner) = decide_winner(state, player) {
        transition(state, TurnPhase::GameEnd { winner })?;
        state.status = GameStatus::won_by(winner);
        report.winner = Some(winner);
    } else if state.round.engine.is_exhausted() {
        transition(state, TurnPhase::RoundEnd)?;
        start_next_round(state, env)?;
        report.round_ended = true;
    } else {
        let next = if extra_turn { player } else { player.opponent() };
        transition(
            state,
            TurnPhase::AwaitingAction {
                player: next,
                gate_applied: false,
            },
        )?;
    }
    Ok(IntentOutcome::Shot(report))
}

/// Winner once someone is out of lives; a shooter who takes both players
/// down loses.
fn decide_winner(state: &GameState, shooter: PlayerId) -> Option<PlayerId> {
    let shooter_alive = state.players[shooter].is_alive();
    let defender_alive = state.players[shooter.opponent()].is_alive();
    match (shooter_alive, defender_alive) {
        (true, true) => None,
        (true, false) => Some(shooter),
        (false, _) => Some(shooter.opponent()),
    }
}

fn start_next_round(state: &mut GameState, env: GameEnv<'_>) -> Result<(), IntentError> {
    state.round = Round::load(
        state.round.number + 1,
        &state.config,
        env,
        state.game_seed,
        state.nonce,
    );
    for player in PlayerId::ALL {
        state.players[player].reset_for_round();
    }
    transition(state, TurnPhase::selection())
}
