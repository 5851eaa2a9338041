use std::sync::{Arc, Mutex, TryLockError};

use tokio::sync::broadcast;
use tracing::warn;

use buckshot_core::{Intent, PlayerId};

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::session::{GameSession, SessionUpdate};
use crate::snapshot::PlayerSnapshot;

/// Client-facing handle to a shared session.
///
/// Clones share the same session. Only one intent is processed at a time:
/// a submission that arrives while another is in flight is refused with
/// [`RuntimeError::SessionBusy`] instead of waiting.
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<GameSession>>,
    events: EventBus,
}

impl SessionHandle {
    pub fn new(session: GameSession) -> Self {
        let events = session.events().clone();
        Self {
            session: Arc::new(Mutex::new(session)),
            events,
        }
    }

    /// Submit an intent under the turn lock.
    pub fn submit(&self, intent: Intent) -> Result<SessionUpdate> {
        self.with_session(|session| session.submit(intent))?
    }

    /// Current view for one player.
    pub fn snapshot_for(&self, viewer: PlayerId) -> Result<PlayerSnapshot> {
        self.with_session(|session| session.snapshot_for(viewer))
    }

    /// Runs `f` while holding the turn lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut GameSession) -> R) -> Result<R> {
        let mut guard = match self.session.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                warn!(target: "runtime::handle", "Intent refused: session busy");
                return Err(RuntimeError::SessionBusy);
            }
            Err(TryLockError::Poisoned(_)) => return Err(RuntimeError::SessionPoisoned),
        };
        Ok(f(&mut *guard))
    }

    /// Subscribe to a specific event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Subscribe to the snapshots meant for `viewer` only
    pub fn subscribe_viewer(&self, viewer: PlayerId) -> broadcast::Receiver<Event> {
        self.events.subscribe_viewer(viewer)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}
