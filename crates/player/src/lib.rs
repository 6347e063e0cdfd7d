// Embeddable media-playback component: playlist navigation, playback
// orchestration, inline/fullscreen presentation and now-playing
// integration, behind capability traits for everything the host owns.
//
// Typical wiring:
//   - implement `MediaEngine` over the platform player,
//   - implement `PlayerSurface` over the widget set and forward taps as
//     `ControlAction`s,
//   - build an `Orchestrator`, hand it to a `PlayerController`,
//   - call `process_events()` from the UI loop.

pub mod adapter;
pub mod cache;
pub mod orchestrator;
pub mod playlist;
pub mod presentation;
pub mod thumbnail;

// Re-exports
pub use adapter::EngineAdapter;
pub use cache::{LookaheadCache, Triad};
pub use orchestrator::{FullscreenLease, Orchestrator, PlayerSignal, FULLSCREEN_SETTLE_DELAY};
pub use playlist::PlayerController;
pub use presentation::{
    display_rect_in_surface, Rect, TransitionKind, TransitionPlan, ViewId, ViewTree,
    DISMISS_DURATION, MAX_ANCESTOR_DEPTH, PRESENT_DURATION,
};
pub use thumbnail::{
    thumbnail_channel, HttpThumbnailProvider, ThumbnailProvider, ThumbnailReply, ThumbnailResult,
};

pub use castkit_core as core;
pub use castkit_engine_api as engine_api;

/// Initialize logging for the current platform.
pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("CastkitPlayer"),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        let _ = env_logger::Builder::from_default_env().try_init();
    }
}
