// Typed engine events delivered over a single channel per adapter.
//
// Every event names the item it belongs to; consumers resolve the race
// where a background prepare lands after the cache has moved on by
// checking identity, not by cancelling the prepare.

use std::time::Duration;

use crossbeam_channel::Sender;

use crate::EngineItemId;

/// Coarse transport status reported by the engine for the active item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Buffering or waiting to play
    Loading,
    Playing,
    Paused,
}

/// Event types posted by an engine binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Transport status changed for an item
    Status {
        item: EngineItemId,
        status: EngineStatus,
    },

    /// A prepared item became decodable; duration when already known
    Ready {
        item: EngineItemId,
        duration: Option<Duration>,
    },

    /// An item cannot be played, with a human-readable reason
    Failed { item: EngineItemId, reason: String },

    /// Periodic progress tick (about 10 Hz) for the active item. Only
    /// emitted once the duration is known and finite.
    Progress {
        item: EngineItemId,
        elapsed: Duration,
        duration: Duration,
    },

    /// The active item finished playing naturally (not a user skip).
    /// One-shot per item.
    Completed { item: EngineItemId },
}

/// Event sender handle installed into an engine binding.
///
/// Engine bindings hold this to post events from whatever thread the OS
/// engine calls back on; the adapter drains them on the orchestrator
/// thread.
#[derive(Clone, Debug)]
pub struct EngineEventSender {
    sender: Option<Sender<EngineEvent>>,
}

impl EngineEventSender {
    /// Create a sender connected to the adapter's channel
    pub fn new(sender: Sender<EngineEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Create a disconnected sender (for tests or engines constructed
    /// before wiring)
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    /// Emit an event; silent if no receiver is connected
    pub fn emit(&self, event: EngineEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event);
        }
    }
}

impl Default for EngineEventSender {
    fn default() -> Self {
        Self::dummy()
    }
}
