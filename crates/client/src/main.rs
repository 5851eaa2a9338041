//! Hot-seat terminal driver for quantum buckshot roulette.
//!
//! Both players share one terminal. Each line is parsed into an intent for
//! the player the game is waiting on. Whenever that player changes the screen
//! is cleared and the next player confirms with Enter before seeing their own
//! view, so gate choices and peeks never sit on screen for the opponent.
//!
//! ```bash
//! QBR_SEED=42 QBR_INITIAL_LIVES=2 cargo run -p buckshot-client
//! ```
mod commands;
mod handover;
mod logging;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use buckshot_core::{GameError, PlayerId};
use buckshot_runtime::{Event, GameSession, IntentEvent, SessionConfig, SessionHandle, Topic};
use tokio::sync::broadcast::Receiver;

use commands::Command;
use handover::Transition;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SessionConfig::from_env();
    let log_path = logging::setup_logging()?;

    let session = GameSession::new(config)?;
    tracing::info!(seed = session.state().game_seed, "Starting hot-seat game");
    let handle = SessionHandle::new(session);
    let mut table = handle.subscribe(Topic::Intent);

    let mut stdout = io::stdout();
    writeln!(stdout, "quantum buckshot roulette (logs: {})", log_path.display())?;
    writeln!(stdout, "{}", commands::HELP)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut shown: Option<PlayerId> = None;
    loop {
        let acting = handle.with_session(|session| handover::expected_actor(session.state()))?;
        // Clock intents carry no player, so the fallback never reaches the engine.
        let viewer = acting.unwrap_or(PlayerId::A);
        let view = handle.snapshot_for(viewer)?;

        match handover::transition(shown, acting) {
            Transition::Keep => {}
            Transition::Handover(player) => {
                write!(stdout, "{}{}", handover::CLEAR_SCREEN, handover::banner(player))?;
                stdout.flush()?;
                match lines.next() {
                    Some(line) => {
                        line?;
                    }
                    None => break,
                }
                write!(stdout, "{}", handover::CLEAR_SCREEN)?;
                for line in public_lines(&mut table) {
                    writeln!(stdout, "{line}")?;
                }
                write!(stdout, "{}", render::snapshot(&view))?;
                tracing::debug!(player = %player, "Terminal handed over");
            }
            Transition::Table => {
                write!(stdout, "{}", handover::CLEAR_SCREEN)?;
                for line in public_lines(&mut table) {
                    writeln!(stdout, "{line}")?;
                }
                write!(stdout, "{}", render::table(&view))?;
            }
        }
        shown = acting;

        if view.game_status.is_over() {
            break;
        }

        match acting {
            Some(player) => write!(stdout, "[{player}] > ")?,
            None => write!(stdout, "[table] > ")?,
        }
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match commands::parse(&line, viewer) {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Submit(intent) => match handle.submit(intent) {
                Ok(update) => {
                    writeln!(stdout, "{}", render::outcome(&update.outcome))?;
                    if let Some(own) = &update.snapshot {
                        write!(stdout, "{}", render::snapshot(own))?;
                    }
                }
                Err(err) => writeln!(stdout, "rejected [{}]: {err}", err.error_code())?,
            },
            Command::Show if acting.is_some() => write!(stdout, "{}", render::snapshot(&view))?,
            Command::Show => write!(stdout, "{}", render::table(&view))?,
            Command::ShowJson if acting.is_some() => {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&view)?)?
            }
            Command::ShowJson => writeln!(stdout, "json views are per player")?,
            Command::Help => writeln!(stdout, "{}", commands::HELP)?,
            Command::Quit => break,
        }
    }

    tracing::info!("Client exiting");
    Ok(())
}

/// Table-visible lines for everything accepted since the last call.
fn public_lines(table: &mut Receiver<Event>) -> Vec<String> {
    std::iter::from_fn(|| table.try_recv().ok())
        .filter_map(|event| match event {
            Event::Intent(IntentEvent::Accepted { outcome, .. }) => Some(render::public(&outcome)),
            _ => None,
        })
        .collect()
}
