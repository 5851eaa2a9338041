//! Who owns the terminal right now.
//!
//! The two players share one screen, so whatever is on it when the turn
//! passes belongs to the player leaving. Every change of actor clears it and
//! waits for the next player to confirm they are the one looking.

use buckshot_core::{GameState, PlayerId, TurnPhase};

/// ANSI erase-display plus cursor-home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// What the loop has to do with the screen before the next prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same owner as before.
    Keep,
    /// Clear, show the banner and wait for `player` to press Enter.
    Handover(PlayerId),
    /// Clear and show only what both players may see.
    Table,
}

/// Player the next typed command belongs to, if any.
///
/// During gate selection that is the first player who has not submitted;
/// nobody owns the reveal window or a finished game.
pub fn expected_actor(state: &GameState) -> Option<PlayerId> {
    if let Some(player) = state.current_player() {
        return Some(player);
    }
    match state.phase {
        TurnPhase::GateSelection { submitted } => {
            PlayerId::ALL.into_iter().find(|player| !submitted[*player])
        }
        _ => None,
    }
}

pub fn transition(shown: Option<PlayerId>, acting: Option<PlayerId>) -> Transition {
    match (shown, acting) {
        (shown, Some(player)) if shown == Some(player) => Transition::Keep,
        (_, Some(player)) => Transition::Handover(player),
        (Some(_), None) => Transition::Table,
        (None, None) => Transition::Keep,
    }
}

pub fn banner(player: PlayerId) -> String {
    format!(
        "==============================\n  \
         Pass the terminal to {player}\n  \
         {player}: press Enter when ready\n\
         ==============================\n"
    )
}
