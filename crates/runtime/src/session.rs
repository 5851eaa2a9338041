//! Game session: owns the authoritative state and its oracles.
//!
//! A [`GameSession`] is the single writer of a [`GameState`]. Intents are
//! forwarded to the core [`TurnEngine`], and each accepted intent produces a
//! fresh [`PlayerSnapshot`] per player plus a burst of bus events.
//!
//! A snapshot only ever travels to its own viewer: the submitter gets theirs
//! in the [`SessionUpdate`], and each player's copy goes out on that
//! player's snapshot topic. [`GameSession::state`] is the unfiltered
//! authoritative state and is not meant for player-facing code.
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use buckshot_core::{
    GameEnv, GameError, GameState, GameStatus, GateKind, GateTarget, Intent, IntentOutcome,
    LoadoutOracle, PcgRng, PhaseKind, PlayerId, RandomLoadout, RngOracle, ShotTarget,
    TurnEngine,
};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::events::{
    Event, EventBus, GameEvent, IntentEvent, PublicOutcome, RoundEvent, SnapshotEvent,
};
use crate::snapshot::PlayerSnapshot;

/// What the submitter gets back for an accepted intent.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionUpdate {
    pub outcome: IntentOutcome,
    /// The submitting player's view; `None` for clock intents, which have no
    /// submitter.
    pub snapshot: Option<PlayerSnapshot>,
}

pub struct GameSession {
    state: GameState,
    rng: Box<dyn RngOracle>,
    loadout: Box<dyn LoadoutOracle>,
    events: EventBus,
}

impl GameSession {
    /// Session with the PCG generator and random loads.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_oracles(config, Box::new(PcgRng), Box::new(RandomLoadout))
    }

    /// Session with caller-supplied oracles, e.g. a fixed load for scripted play.
    pub fn with_oracles(
        config: SessionConfig,
        rng: Box<dyn RngOracle>,
        loadout: Box<dyn LoadoutOracle>,
    ) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let env = GameEnv::new(rng.as_ref(), loadout.as_ref());
        let state = GameState::new(config.game.clone(), seed, env)?;

        info!(
            target: "runtime::session",
            seed,
            lives = state.config.initial_lives,
            bullets = state.round.engine.bullet_count(),
            "Session created"
        );

        let session = Self {
            state,
            rng,
            loadout,
            events: EventBus::with_capacity(config.event_capacity),
        };
        session.announce_round_start();
        Ok(session)
    }

    /// Applies `intent` and returns the outcome with the submitter's snapshot.
    ///
    /// A rejected intent leaves the state untouched and is published on the
    /// intent topic before the error is returned.
    pub fn submit(&mut self, intent: Intent) -> Result<SessionUpdate> {
        let phase_before = self.state.phase.kind();
        let round_before = self.state.round.number;

        let env = GameEnv::new(self.rng.as_ref(), self.loadout.as_ref());
        let result = TurnEngine::new(&mut self.state).execute(env, &intent);

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    target: "runtime::session",
                    intent = %intent.kind(),
                    error_code = error.error_code(),
                    "Intent rejected: {}",
                    error
                );
                self.events.publish(Event::Intent(IntentEvent::Rejected {
                    intent: intent.kind(),
                    error_code: error.error_code().to_string(),
                    message: error.to_string(),
                }));
                return Err(error.into());
            }
        };

        let phase_after = self.state.phase.kind();
        debug!(
            target: "runtime::session",
            intent = %intent.kind(),
            nonce = self.state.nonce,
            "Intent accepted"
        );
        if phase_before != phase_after {
            debug!(
                target: "runtime::session",
                from = %phase_before,
                to = %phase_after,
                "Phase transition"
            );
        }

        self.events.publish(Event::Intent(IntentEvent::Accepted {
            intent: intent.kind(),
            outcome: PublicOutcome::from(&outcome),
            nonce: self.state.nonce,
        }));

        if let IntentOutcome::Shot(report) = &outcome {
            info!(
                target: "runtime::session",
                shooter = %report.shooter,
                target_player = %report.target_player,
                bullet = report.bullet,
                outcome = %report.outcome,
                "Shot fired"
            );
        }

        if self.state.round.number != round_before {
            info!(target: "runtime::session", round = round_before, "Round ended");
            self.events
                .publish(Event::Round(RoundEvent::Ended { round: round_before }));
            self.announce_round_start();
        } else if phase_after == PhaseKind::GameEnd {
            info!(target: "runtime::session", round = round_before, "Round ended");
            self.events
                .publish(Event::Round(RoundEvent::Ended { round: round_before }));
        }

        // Intents are refused once the game is over, so a winner here is new.
        if let Some(winner) = self.state.status.winner() {
            info!(
                target: "runtime::session",
                winner = %winner,
                rounds_played = self.state.round.number,
                "Game over"
            );
            self.events.publish(Event::Game(GameEvent::Ended {
                winner,
                rounds_played: self.state.round.number,
            }));
        }

        for viewer in PlayerId::ALL {
            self.events.publish(Event::Snapshot(SnapshotEvent {
                viewer,
                snapshot: Box::new(PlayerSnapshot::capture(&self.state, viewer)),
            }));
        }

        Ok(SessionUpdate {
            outcome,
            snapshot: intent
                .player()
                .map(|viewer| PlayerSnapshot::capture(&self.state, viewer)),
        })
    }

    pub fn select_gates(
        &mut self,
        player: PlayerId,
        gates: Vec<GateKind>,
    ) -> Result<SessionUpdate> {
        self.submit(Intent::SelectGates { player, gates })
    }

    pub fn apply_gate(
        &mut self,
        player: PlayerId,
        gate: GateKind,
        target: GateTarget,
    ) -> Result<SessionUpdate> {
        self.submit(Intent::ApplyGate {
            player,
            gate,
            target,
        })
    }

    pub fn shoot(&mut self, player: PlayerId, target: ShotTarget) -> Result<SessionUpdate> {
        self.submit(Intent::Shoot { player, target })
    }

    pub fn peek(&mut self, player: PlayerId) -> Result<SessionUpdate> {
        self.submit(Intent::Peek { player })
    }

    pub fn reveal_ack(&mut self) -> Result<SessionUpdate> {
        self.submit(Intent::RevealAck)
    }

    pub fn reveal_tick(&mut self) -> Result<SessionUpdate> {
        self.submit(Intent::RevealTick)
    }

    /// Current view for one player without submitting anything.
    pub fn snapshot_for(&self, viewer: PlayerId) -> PlayerSnapshot {
        PlayerSnapshot::capture(&self.state, viewer)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn announce_round_start(&self) {
        let round = self.state.round.number;
        info!(
            target: "runtime::session",
            round,
            bullets = self.state.round.engine.bullet_count(),
            "Round started"
        );
        self.events
            .publish(Event::Round(RoundEvent::Started { round }));
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
