//! Outbound per-player view model.
use serde::{Deserialize, Serialize};

use buckshot_core::{
    BulletIndex, BulletView, GameState, GameStatus, GateKind, PerPlayer, PhaseKind, PlayerId,
    TurnPhase, view_for,
};

/// Everything one player may see after an intent.
///
/// Built fresh from the authoritative state each time; two snapshots of the
/// same moment differ only where the visibility rules say they must.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub viewer: PlayerId,
    pub lives: PerPlayer<u8>,
    pub queue: Vec<BulletView>,
    /// Bullet the next shot will fire.
    pub next_bullet: Option<BulletIndex>,
    pub current_player: Option<PlayerId>,
    pub round_number: u32,
    pub turn_phase: PhaseKind,
    /// Opponent's unused gates as they stood when this player peeked this
    /// round. Not refreshed afterwards: gates the opponent spends later still
    /// show here until the round ends.
    pub peeked_gates: Option<Vec<GateKind>>,
    /// This player's unused gates for the round.
    pub own_gates: Vec<GateKind>,
    /// A peek would be accepted right now.
    pub peek_available: bool,
    pub game_status: GameStatus,
}

impl PlayerSnapshot {
    pub fn capture(state: &GameState, viewer: PlayerId) -> Self {
        let player = state.player(viewer);
        let own_turn = matches!(
            state.phase,
            TurnPhase::AwaitingAction { player: acting, .. } if acting == viewer
        );

        Self {
            viewer,
            lives: state.lives(),
            queue: view_for(viewer, &state.round),
            next_bullet: state.round.engine.next_unfired(),
            current_player: state.current_player(),
            round_number: state.round.number,
            turn_phase: state.phase.kind(),
            peeked_gates: player
                .peek_result
                .as_ref()
                .map(|pool| pool.remaining().to_vec()),
            own_gates: player.gates.remaining().to_vec(),
            peek_available: own_turn && !player.peek_used,
            game_status: state.status,
        }
    }

    /// Whether the snapshot's viewer is the player expected to act.
    pub fn is_viewers_turn(&self) -> bool {
        self.current_player == Some(self.viewer)
    }
}
