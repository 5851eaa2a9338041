//! Plain-text rendering of snapshots and intent outcomes.
use std::fmt::Write;

use buckshot_core::{GateKind, GateTarget, IntentOutcome, PhaseKind, ShotReport, VisibleStatus};
use buckshot_runtime::{PlayerSnapshot, PublicOutcome};

/// One short symbol per visible status, used in the queue line.
fn symbol(status: VisibleStatus) -> &'static str {
    match status {
        VisibleStatus::FiredLive => "x",
        VisibleStatus::FiredBlank => "o",
        VisibleStatus::DefiniteLive => "L",
        VisibleStatus::DefiniteBlank => "B",
        VisibleStatus::Superposed => "~",
        VisibleStatus::Entangled => "&",
        VisibleStatus::Unknown => "?",
    }
}

fn gate_list(gates: &[GateKind]) -> String {
    if gates.is_empty() {
        return "none".to_string();
    }
    gates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn queue_line(view: &PlayerSnapshot) -> String {
    view
        .queue
        .iter()
        .map(|bullet| {
            let marker = if Some(bullet.index) == view.next_bullet { ">" } else { " " };
            format!("{marker}{}:{}", bullet.index, symbol(bullet.status))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn snapshot(view: &PlayerSnapshot) -> String {
    let mut out = String::new();
    let opponent = view.viewer.opponent();

    let _ = writeln!(
        out,
        "== round {} | {} | view of {} ==",
        view.round_number, view.turn_phase, view.viewer
    );
    let _ = writeln!(
        out,
        "lives: {} {} | {} {}",
        view.viewer, view.lives[view.viewer], opponent, view.lives[opponent]
    );
    let _ = writeln!(out, "queue: {}", queue_line(view));
    let _ = writeln!(out, "gates: {}", gate_list(&view.own_gates));

    if let Some(peeked) = &view.peeked_gates {
        let _ = writeln!(out, "{opponent} holds: {}", gate_list(peeked));
    } else if view.peek_available {
        let _ = writeln!(out, "peek available");
    }

    match view.game_status.winner() {
        Some(winner) => {
            let _ = writeln!(out, "game over: {winner} wins");
        }
        None => match view.current_player {
            Some(player) => {
                let _ = writeln!(out, "{player} to act");
            }
            None if view.turn_phase == PhaseKind::Reveal => {
                let _ = writeln!(out, "reveal window open: `ack` or `tick`");
            }
            None => {}
        },
    }
    out
}

/// Shared-screen view: lives, the queue and the phase, no gates.
///
/// Only meaningful for moments when both players see the same queue, i.e.
/// an open reveal window or a finished game.
pub fn table(view: &PlayerSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== round {} | {} ==",
        view.round_number, view.turn_phase
    );
    let (a, b) = (view.lives.a, view.lives.b);
    let _ = writeln!(out, "lives: Player A {a} | Player B {b}");
    let _ = writeln!(out, "queue: {}", queue_line(view));
    match view.game_status.winner() {
        Some(winner) => {
            let _ = writeln!(out, "game over: {winner} wins");
        }
        None if view.turn_phase == PhaseKind::Reveal => {
            let _ = writeln!(out, "reveal window open: `ack` or `tick`");
        }
        None => {}
    }
    out
}

fn shot(report: &ShotReport) -> String {
    let mut line = format!(
        "{} fired bullet {} at {}: {}",
        report.shooter, report.bullet, report.target_player, report.outcome
    );
    if report.damage_dealt {
        let _ = write!(line, " ({} lives left)", report.target_lives);
    }
    if report.extra_turn {
        line.push_str(", extra turn");
    }
    if report.round_ended {
        line.push_str(", round over");
    }
    line
}

/// What happened, as the player who did it sees it.
pub fn outcome(outcome: &IntentOutcome) -> String {
    match outcome {
        IntentOutcome::GatesSelected {
            player,
            reveal_opened,
        } => {
            if *reveal_opened {
                format!("{player} locked in gates; the load is revealed")
            } else {
                format!("{player} locked in gates")
            }
        }
        IntentOutcome::GateApplied(record) => {
            let target = match record.target {
                GateTarget::Single(bullet) => format!("bullet {bullet}"),
                GateTarget::Pair { control, target } => format!("bullets {control} -> {target}"),
            };
            format!("{} applied {} to {target}", record.player, record.gate)
        }
        IntentOutcome::Shot(report) => shot(report),
        IntentOutcome::Peeked {
            player,
            opponent_gates,
        } => format!(
            "{player} peeked: {}",
            gate_list(opponent_gates.remaining())
        ),
        IntentOutcome::RevealTicked { ticks_elapsed } => {
            format!("reveal tick {ticks_elapsed}")
        }
        IntentOutcome::RevealClosed => "reveal window closed".to_string(),
    }
}

/// What happened, as the other player is allowed to hear it.
pub fn public(outcome: &PublicOutcome) -> String {
    match outcome {
        PublicOutcome::GatesSelected { player, .. } => format!("{player} locked in gates"),
        PublicOutcome::GateApplied { player, .. } => format!("{player} applied a gate"),
        PublicOutcome::Shot(report) => shot(report),
        PublicOutcome::Peeked { player } => format!("{player} peeked at your gates"),
        PublicOutcome::RevealTicked { ticks_elapsed } => {
            format!("reveal tick {ticks_elapsed}")
        }
        PublicOutcome::RevealClosed => "reveal window closed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buckshot_core::{BulletView, GameStatus, PerPlayer, PlayerId};

    fn view() -> PlayerSnapshot {
        PlayerSnapshot {
            viewer: PlayerId::A,
            lives: PerPlayer::new(3, 2),
            queue: vec![
                BulletView {
                    index: 0,
                    status: VisibleStatus::FiredBlank,
                },
                BulletView {
                    index: 1,
                    status: VisibleStatus::Superposed,
                },
                BulletView {
                    index: 2,
                    status: VisibleStatus::Unknown,
                },
            ],
            next_bullet: Some(1),
            current_player: Some(PlayerId::A),
            round_number: 2,
            turn_phase: PhaseKind::AwaitingAction,
            peeked_gates: None,
            own_gates: vec![GateKind::H, GateKind::Cnot],
            peek_available: true,
            game_status: GameStatus::InProgress,
        }
    }

    #[test]
    fn snapshot_marks_the_next_bullet() {
        let text = snapshot(&view());
        assert!(text.contains("queue:  0:o >1:~  2:?"));
        assert!(text.contains("lives: Player A 3 | Player B 2"));
        assert!(text.contains("gates: H CNOT"));
        assert!(text.contains("peek available"));
        assert!(text.contains("Player A to act"));
    }

    #[test]
    fn finished_games_name_the_winner() {
        let mut finished = view();
        finished.current_player = None;
        finished.game_status = GameStatus::PlayerBWon;
        finished.peek_available = false;
        finished.peeked_gates = Some(Vec::new());
        let text = snapshot(&finished);
        assert!(text.contains("game over: Player B wins"));
        assert!(text.contains("Player B holds: none"));
    }

    #[test]
    fn table_view_omits_gates() {
        let mut shared = view();
        shared.current_player = None;
        shared.turn_phase = PhaseKind::Reveal;
        let text = table(&shared);
        assert!(text.contains("lives: Player A 3 | Player B 2"));
        assert!(text.contains("reveal window open"));
        assert!(!text.contains("gates:"));
        assert!(!text.contains("CNOT"));
    }

    #[test]
    fn opponent_gate_lines_hide_kind_and_target() {
        let line = public(&PublicOutcome::GateApplied {
            player: PlayerId::A,
            sequence: 2,
        });
        assert_eq!(line, "Player A applied a gate");
        assert!(!line.contains("bullet"));

        let own = outcome(&IntentOutcome::GateApplied(buckshot_core::GateRecord {
            sequence: 2,
            player: PlayerId::A,
            gate: GateKind::H,
            target: GateTarget::Single(3),
        }));
        assert_eq!(own, "Player A applied H to bullet 3");
    }

    #[test]
    fn reveal_outcomes_read_plainly() {
        assert_eq!(outcome(&IntentOutcome::RevealClosed), "reveal window closed");
        assert_eq!(
            outcome(&IntentOutcome::GatesSelected {
                player: PlayerId::B,
                reveal_opened: true,
            }),
            "Player B locked in gates; the load is revealed"
        );
    }
}
