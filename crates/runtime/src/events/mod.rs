//! Topic-based event bus for session events.
//!
//! Events are published to specific topics, and consumers can subscribe only
//! to the topics they need. Snapshots have one topic per viewer; the shared
//! topics carry only what is visible across the table.
//!
//! Everything is synchronous: observers poll their receivers with
//! `try_recv`, so no async executor is required.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{GameEvent, IntentEvent, PublicOutcome, RoundEvent, SnapshotEvent};
