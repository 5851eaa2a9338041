//! Command-line parsing for the hot-seat client.
//!
//! This module owns the text-to-intent mapping so the loop in `main` only
//! deals with fully formed [`Command`]s.

use std::str::FromStr;

use buckshot_core::{BulletIndex, GateKind, GateTarget, Intent, PlayerId, ShotTarget};
use thiserror::Error;

/// High-level outcome of parsing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the decoded intent to the session.
    Submit(Intent),
    /// Print the actor's snapshot again.
    Show,
    /// Print the actor's snapshot as JSON.
    ShowJson,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),

    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("unknown gate `{0}`")]
    InvalidGate(String),

    #[error("`{0}` is not a bullet index")]
    InvalidBullet(String),

    #[error("shoot `self` or `opp`, not `{0}`")]
    InvalidShotTarget(String),

    #[error("unexpected extra argument `{0}`")]
    Unexpected(String),
}

pub const HELP: &str = "\
commands:
  select <gate>...              pick this round's gates (x y z h rx ry rz cx)
  apply <gate> <bullet> [<bullet>]  apply a gate; CNOT takes control then target
  shoot self|opp                fire the next bullet
  peek                          look at the opponent's unused gates (once per round)
  ack                           close the reveal window
  tick                          let one reveal unit pass
  show [json]                   print your view again
  help                          this text
  quit                          leave the game";

/// Parses `line` on behalf of `actor`.
pub fn parse(line: &str, actor: PlayerId) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();

    let command = match verb.as_str() {
        "select" => {
            let gates = words.by_ref().map(parse_gate).collect::<Result<Vec<_>, _>>()?;
            if gates.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "select",
                    what: "at least one gate",
                });
            }
            Command::Submit(Intent::SelectGates {
                player: actor,
                gates,
            })
        }
        "apply" => {
            let gate = words.next().ok_or(ParseError::MissingArgument {
                command: "apply",
                what: "a gate",
            })?;
            let gate = parse_gate(gate)?;
            let first = words.next().ok_or(ParseError::MissingArgument {
                command: "apply",
                what: "a bullet index",
            })?;
            let first = parse_bullet(first)?;
            let target = match words.next() {
                Some(second) => GateTarget::Pair {
                    control: first,
                    target: parse_bullet(second)?,
                },
                None => GateTarget::Single(first),
            };
            Command::Submit(Intent::ApplyGate {
                player: actor,
                gate,
                target,
            })
        }
        "shoot" => {
            let target = words.next().ok_or(ParseError::MissingArgument {
                command: "shoot",
                what: "`self` or `opp`",
            })?;
            let target = ShotTarget::from_str(target)
                .map_err(|_| ParseError::InvalidShotTarget(target.to_string()))?;
            Command::Submit(Intent::Shoot {
                player: actor,
                target,
            })
        }
        "peek" => Command::Submit(Intent::Peek { player: actor }),
        "ack" => Command::Submit(Intent::RevealAck),
        "tick" => Command::Submit(Intent::RevealTick),
        "show" => match words.next() {
            Some(format) if format.eq_ignore_ascii_case("json") => Command::ShowJson,
            Some(other) => return Err(ParseError::Unexpected(other.to_string())),
            None => Command::Show,
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::UnknownCommand(verb)),
    };

    match words.next() {
        Some(extra) => Err(ParseError::Unexpected(extra.to_string())),
        None => Ok(command),
    }
}

fn parse_gate(word: &str) -> Result<GateKind, ParseError> {
    GateKind::from_str(word).map_err(|_| ParseError::InvalidGate(word.to_string()))
}

fn parse_bullet(word: &str) -> Result<BulletIndex, ParseError> {
    word.parse()
        .map_err(|_| ParseError::InvalidBullet(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_collects_every_gate() {
        let command = parse("select h X cx", PlayerId::B).unwrap();
        assert_eq!(
            command,
            Command::Submit(Intent::SelectGates {
                player: PlayerId::B,
                gates: vec![GateKind::H, GateKind::X, GateKind::Cnot],
            })
        );
    }

    #[test]
    fn apply_reads_single_and_pair_targets() {
        assert_eq!(
            parse("apply rx 2", PlayerId::A).unwrap(),
            Command::Submit(Intent::ApplyGate {
                player: PlayerId::A,
                gate: GateKind::Rx,
                target: GateTarget::Single(2),
            })
        );
        assert_eq!(
            parse("apply cx 0 3", PlayerId::A).unwrap(),
            Command::Submit(Intent::ApplyGate {
                player: PlayerId::A,
                gate: GateKind::Cnot,
                target: GateTarget::Pair {
                    control: 0,
                    target: 3
                },
            })
        );
    }

    #[test]
    fn shoot_accepts_short_names() {
        assert_eq!(
            parse("shoot opp", PlayerId::A).unwrap(),
            Command::Submit(Intent::Shoot {
                player: PlayerId::A,
                target: ShotTarget::Opponent,
            })
        );
        assert_eq!(
            parse("SHOOT self", PlayerId::B).unwrap(),
            Command::Submit(Intent::Shoot {
                player: PlayerId::B,
                target: ShotTarget::Shooter,
            })
        );
    }

    #[test]
    fn clock_and_meta_commands() {
        assert_eq!(parse("ack", PlayerId::A).unwrap(), Command::Submit(Intent::RevealAck));
        assert_eq!(parse("tick", PlayerId::A).unwrap(), Command::Submit(Intent::RevealTick));
        assert_eq!(parse("show json", PlayerId::A).unwrap(), Command::ShowJson);
        assert_eq!(parse("  quit ", PlayerId::A).unwrap(), Command::Quit);
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert_eq!(parse("   ", PlayerId::A), Err(ParseError::Empty));
        assert_eq!(
            parse("fire", PlayerId::A),
            Err(ParseError::UnknownCommand("fire".into()))
        );
        assert_eq!(
            parse("apply q 1", PlayerId::A),
            Err(ParseError::InvalidGate("q".into()))
        );
        assert_eq!(
            parse("apply x one", PlayerId::A),
            Err(ParseError::InvalidBullet("one".into()))
        );
        assert_eq!(
            parse("shoot dealer", PlayerId::A),
            Err(ParseError::InvalidShotTarget("dealer".into()))
        );
        assert_eq!(
            parse("peek now", PlayerId::A),
            Err(ParseError::Unexpected("now".into()))
        );
        assert!(matches!(
            parse("select", PlayerId::A),
            Err(ParseError::MissingArgument { command: "select", .. })
        ));
    }
}
