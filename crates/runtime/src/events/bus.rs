//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use buckshot_core::{PerPlayer, PlayerId};

use super::types::{GameEvent, IntentEvent, RoundEvent, SnapshotEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Accepted and rejected intents, with private details stripped
    Intent,
    /// Round lifecycle
    Round,
    /// One player's snapshot after each accepted intent
    Snapshot(PlayerId),
    /// Game over
    Game,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Intent,
        Topic::Round,
        Topic::Snapshot(PlayerId::A),
        Topic::Snapshot(PlayerId::B),
        Topic::Game,
    ];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Intent(IntentEvent),
    Round(RoundEvent),
    Snapshot(SnapshotEvent),
    Game(GameEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Intent(_) => Topic::Intent,
            Event::Round(_) => Topic::Round,
            Event::Snapshot(event) => Topic::Snapshot(event.viewer),
            Event::Game(_) => Topic::Game,
        }
    }
}

/// One broadcast sender per topic, created up front.
struct Channels {
    intent: broadcast::Sender<Event>,
    round: broadcast::Sender<Event>,
    snapshot: PerPlayer<broadcast::Sender<Event>>,
    game: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Intent => &self.intent,
            Topic::Round => &self.round,
            Topic::Snapshot(viewer) => &self.snapshot[viewer],
            Topic::Game => &self.game,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks and never fails.
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                intent: broadcast::channel(capacity).0,
                round: broadcast::channel(capacity).0,
                snapshot: PerPlayer::from_fn(|_| broadcast::channel(capacity).0),
                game: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to the snapshots meant for `viewer` only
    pub fn subscribe_viewer(&self, viewer: PlayerId) -> broadcast::Receiver<Event> {
        self.subscribe(Topic::Snapshot(viewer))
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::PlayerSnapshot;
    use buckshot_core::{FixedLoadout, GameConfig, GameEnv, GameState, Outcome, PcgRng};

    #[test]
    fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut receivers = bus.subscribe_multiple(&Topic::ALL);

        bus.publish(Event::Game(GameEvent::Ended {
            winner: PlayerId::A,
            rounds_played: 2,
        }));

        let game = receivers.get_mut(&Topic::Game).expect("subscribed");
        assert!(matches!(
            game.try_recv(),
            Ok(Event::Game(GameEvent::Ended {
                winner: PlayerId::A,
                ..
            }))
        ));
        let round = receivers.get_mut(&Topic::Round).expect("subscribed");
        assert!(round.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(Event::Round(RoundEvent::Started { round: 1 }));
        let mut late = bus.subscribe(Topic::Round);
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn snapshots_reach_only_their_viewer() {
        let layout = vec![Outcome::Live, Outcome::Blank, Outcome::Blank, Outcome::Live];
        let loadout = FixedLoadout::repeating(layout).expect("valid layout");
        let state = GameState::new(
            GameConfig::default().with_bullet_count(4),
            1,
            GameEnv::new(&PcgRng, &loadout),
        )
        .expect("valid config");

        let bus = EventBus::new();
        let mut a = bus.subscribe_viewer(PlayerId::A);
        let mut b = bus.subscribe_viewer(PlayerId::B);
        bus.publish(Event::Snapshot(SnapshotEvent {
            viewer: PlayerId::B,
            snapshot: Box::new(PlayerSnapshot::capture(&state, PlayerId::B)),
        }));

        assert!(a.try_recv().is_err());
        assert!(matches!(
            b.try_recv(),
            Ok(Event::Snapshot(SnapshotEvent {
                viewer: PlayerId::B,
                ..
            }))
        ));
    }
}
