// Engine adapter: owns the engine binding and the inbound event channel

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, TryRecvError};

use castkit_core::Result;
use castkit_engine_api::{
    EngineEvent, EngineEventSender, EngineItem, EngineItemId, MediaEngine, PrepareMode,
};

/// Wraps the external media engine behind a single event subscription.
///
/// The adapter tracks the one item currently assigned to the engine;
/// exactly one item is active at a time. Commands are synchronous, all
/// asynchronous outcomes arrive through [`EngineAdapter::try_next_event`]
/// and are drained on the orchestrator thread.
pub struct EngineAdapter {
    engine: Box<dyn MediaEngine>,
    events: Receiver<EngineEvent>,
    active: Option<EngineItemId>,
}

impl EngineAdapter {
    pub fn new(mut engine: Box<dyn MediaEngine>) -> Self {
        let (tx, rx) = unbounded();
        engine.set_event_sender(EngineEventSender::new(tx));
        Self {
            engine,
            events: rx,
            active: None,
        }
    }

    /// Prepare a resource, blocking or in the background.
    pub fn prepare(&mut self, url: &str, mode: PrepareMode) -> Result<EngineItem> {
        self.engine.prepare(url, mode)
    }

    /// Swap the active decodable unit.
    pub fn activate(&mut self, item: &EngineItem) {
        log::debug!("activating engine item {:?} ({})", item.id, item.url);
        self.active = Some(item.id);
        self.engine.activate(item.id);
    }

    /// Start or resume playback. A no-op when nothing is loaded.
    pub fn play(&mut self) {
        if self.active.is_none() {
            log::debug!("play ignored: no active item");
            return;
        }
        self.engine.play();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    /// Seek to an absolute position; the engine applies its own bounds.
    pub fn seek(&mut self, position: Duration) {
        self.engine.seek(position);
    }

    /// Seek to a fraction of the duration. Silently ignored while the
    /// duration is not yet known.
    pub fn seek_to_ratio(&mut self, ratio: f64) {
        let Some(duration) = self.engine.duration() else {
            return;
        };
        let target = duration.as_secs_f64() * ratio.clamp(0.0, 1.0);
        self.engine.seek(Duration::from_secs_f64(target.max(0.0)));
    }

    /// Jump forward or backward by whole seconds from the current
    /// position. The engine clamps the upper bound.
    pub fn skip_by(&mut self, seconds: f64) {
        let current = self.engine.position().as_secs_f64();
        let target = (current + seconds).max(0.0);
        self.engine.seek(Duration::from_secs_f64(target));
    }

    pub fn position(&self) -> Duration {
        self.engine.position()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.engine.duration()
    }

    /// Drop a prepared item and tear down its engine-level observers.
    pub fn discard(&mut self, item: &EngineItem) {
        if self.active == Some(item.id) {
            self.active = None;
        }
        self.engine.discard(item.id);
    }

    pub fn is_active(&self, id: EngineItemId) -> bool {
        self.active == Some(id)
    }

    pub fn active_id(&self) -> Option<EngineItemId> {
        self.active
    }

    /// Next queued engine event, if any. Never blocks.
    pub fn try_next_event(&self) -> Option<EngineEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn detach_renderer(&mut self) {
        self.engine.detach_renderer();
    }

    pub fn attach_renderer(&mut self) {
        self.engine.attach_renderer();
    }
}
