// Playback engine seam: trait and handle types every engine binding
// implements. The OS media engine (decode, render, remote routing) lives
// behind this boundary.

pub mod event;

pub use event::{EngineEvent, EngineEventSender, EngineStatus};

use std::time::Duration;

use castkit_core::Result;

/// Opaque identity of an engine-prepared item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineItemId(pub u64);

/// Load status of an engine-prepared item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Preparation still in flight (background prepare)
    Unknown,
    /// Decodable and ready for activation
    Ready,
    /// Preparation failed; the handle must not be activated
    Failed,
}

/// Engine-prepared handle to a media resource.
///
/// Owned by the look-ahead cache while cached; the id is handed to the
/// engine on activation. Duration is filled in once the engine knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineItem {
    pub id: EngineItemId,
    pub url: String,
    pub state: LoadState,
    pub duration: Option<Duration>,
}

/// How a prepare call is allowed to behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareMode {
    /// Block until the item is decodable; used for the item needed
    /// immediately. Malformed resources fail here.
    Blocking,
    /// Return an `Unknown` handle at once and report readiness or failure
    /// through events; used for look-ahead neighbors.
    Background,
}

/// The playback engine, consumed as an opaque collaborator.
///
/// Implementations bind an actual OS engine (ExoPlayer, AVPlayer, a
/// GStreamer pipeline). All asynchronous outcomes are delivered through the
/// [`EngineEventSender`] installed with [`MediaEngine::set_event_sender`],
/// tagged with the item id they belong to; observers for a prepared item
/// are torn down by [`MediaEngine::discard`].
pub trait MediaEngine: Send {
    /// Install the sender used for all subsequent events. Called once by
    /// the adapter before any other method.
    fn set_event_sender(&mut self, sender: EngineEventSender);

    /// Prepare a resource for playback.
    fn prepare(&mut self, url: &str, mode: PrepareMode) -> Result<EngineItem>;

    /// Swap the active decodable unit. Status events for the item follow.
    fn activate(&mut self, item: EngineItemId);

    /// Start or resume playback of the active item
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Seek the active item to an absolute position. Out-of-range values
    /// are clamped by the engine's own bounds.
    fn seek(&mut self, position: Duration);

    /// Current playback position of the active item
    fn position(&self) -> Duration;

    /// Duration of the active item once known
    fn duration(&self) -> Option<Duration>;

    /// Drop a prepared item and remove its observers. No further events
    /// for this id are delivered.
    fn discard(&mut self, item: EngineItemId);

    /// Detach the render target from the inline layer, lending the live
    /// playback to a fullscreen presentation.
    fn detach_renderer(&mut self);

    /// Reclaim rendering after a fullscreen session ends.
    fn attach_renderer(&mut self);
}
