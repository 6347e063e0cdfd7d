// Player orchestrator: binds the engine adapter, the look-ahead cache, the
// surface and the now-playing sink into one state machine

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use parking_lot::Mutex;

use castkit_core::{
    format_position, Artwork, MediaKind, NowPlayingInfo, NowPlayingSink, PlayableItem,
    PlayerStatus, PlayerSurface,
};
use castkit_engine_api::{EngineEvent, EngineStatus, MediaEngine};

use crate::adapter::EngineAdapter;
use crate::cache::{LookaheadCache, Triad};
use crate::thumbnail::{thumbnail_channel, ThumbnailProvider, ThumbnailReply, ThumbnailResult};

/// Default wait before resuming inline rendering after a fullscreen
/// session ends. The fullscreen presentation cleans up the engine on
/// dismissal; resuming before that settles races its teardown. A
/// workaround, not a correctness guarantee — prefer an explicit attach
/// acknowledgement when the engine exposes one.
pub const FULLSCREEN_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// How often now-playing elapsed updates are pushed to the OS surface.
const NOW_PLAYING_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Outbound notification drained by the playlist controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSignal {
    /// The orchestrator's status changed
    Status(PlayerStatus),
    /// The active item finished playing naturally
    Completed,
}

/// Token proving the live engine was lent to a fullscreen presentation.
///
/// Returned by [`Orchestrator::prepare_for_fullscreen`] and consumed by
/// [`Orchestrator::restore_from_fullscreen`].
#[derive(Debug)]
pub struct FullscreenLease {
    was_playing: bool,
}

impl FullscreenLease {
    pub fn was_playing(&self) -> bool {
        self.was_playing
    }
}

/// Throttles high-frequency progress pushes to the now-playing surface.
struct ProgressThrottle {
    last_update: Mutex<Option<Instant>>,
    interval: Duration,
}

impl ProgressThrottle {
    fn new(interval: Duration) -> Self {
        Self {
            last_update: Mutex::new(None),
            interval,
        }
    }

    fn ready(&self) -> bool {
        let mut last_update = self.last_update.lock();
        match *last_update {
            Some(at) if at.elapsed() < self.interval => false,
            _ => {
                *last_update = Some(Instant::now());
                true
            }
        }
    }
}

/// The core state machine.
///
/// Owns the engine adapter, the look-ahead cache and the now-playing
/// metadata exclusively; all state transitions happen on the thread that
/// calls [`Orchestrator::pump`]. Background prepares and thumbnail fetches
/// marshal their results back through channels drained there.
pub struct Orchestrator {
    adapter: EngineAdapter,
    cache: LookaheadCache,
    surface: Box<dyn PlayerSurface>,
    now_playing: Box<dyn NowPlayingSink>,
    thumbnails: Box<dyn ThumbnailProvider>,
    thumb_reply: ThumbnailReply,
    thumb_results: Receiver<ThumbnailResult>,
    status: PlayerStatus,
    current: Option<PlayableItem>,
    now_info: NowPlayingInfo,
    now_playing_throttle: ProgressThrottle,
    pending_resume: Option<Instant>,
    settle_delay: Duration,
    signals: Vec<PlayerSignal>,
}

impl Orchestrator {
    pub fn new(
        engine: Box<dyn MediaEngine>,
        surface: Box<dyn PlayerSurface>,
        mut now_playing: Box<dyn NowPlayingSink>,
        thumbnails: Box<dyn ThumbnailProvider>,
    ) -> Self {
        let (thumb_reply, thumb_results) = thumbnail_channel();
        now_playing.attach();
        Self {
            adapter: EngineAdapter::new(engine),
            cache: LookaheadCache::new(),
            surface,
            now_playing,
            thumbnails,
            thumb_reply,
            thumb_results,
            status: PlayerStatus::Idle,
            current: None,
            now_info: NowPlayingInfo::default(),
            now_playing_throttle: ProgressThrottle::new(NOW_PLAYING_UPDATE_INTERVAL),
            pending_resume: None,
            settle_delay: FULLSCREEN_SETTLE_DELAY,
            signals: Vec::new(),
        }
    }

    pub fn status(&self) -> &PlayerStatus {
        &self.status
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.current.as_ref()
    }

    /// Override the fullscreen settle delay (tests, engines with faster
    /// teardown).
    pub fn set_fullscreen_settle_delay(&mut self, delay: Duration) {
        self.settle_delay = delay;
    }

    pub fn auto_advance(&self) -> bool {
        self.surface.settings().auto_advance
    }

    pub(crate) fn skip_seconds(&self) -> f64 {
        self.surface.settings().skip_seconds
    }

    /// Number of prepared items currently warm. Exposed for hosts that
    /// report cache behavior.
    pub fn cached_items(&self) -> usize {
        self.cache.len()
    }

    /// Start playing a new item, warming its neighbors.
    ///
    /// Emits `Loading` immediately; whatever the engine subsequently
    /// reports follows through `pump`. A blocking prepare failure turns
    /// into `Failed` so the controller's skip-on-failure policy applies.
    pub fn start_item(
        &mut self,
        item: &PlayableItem,
        previous: Option<&PlayableItem>,
        next: Option<&PlayableItem>,
    ) {
        // A resume deferred from a fullscreen exit belongs to the old item.
        self.pending_resume = None;

        self.surface.set_scrubber_position(0.0);
        self.surface.set_time_labels(
            &format_position(Duration::ZERO),
            &format_position(Duration::ZERO),
        );
        self.set_status(PlayerStatus::Loading);

        let triad = Triad {
            previous,
            current: item,
            next,
        };
        let engine_item = match self.cache.replace(&triad, &mut self.adapter) {
            Ok(engine_item) => engine_item,
            Err(err) => {
                log::warn!("failed to prepare {}: {}", item.url, err);
                self.set_status(PlayerStatus::Failed(err.to_string()));
                return;
            }
        };

        self.adapter.activate(&engine_item);
        self.adapter.seek(Duration::ZERO);
        self.adapter.play();
        self.current = Some(item.clone());
        self.refresh_surface(item);
        self.push_initial_now_playing(item, engine_item.duration);
    }

    /// Play if paused, pause if playing; no-op in any other state.
    pub fn toggle_play_pause(&mut self) {
        match self.status {
            PlayerStatus::Playing => self.pause(),
            PlayerStatus::Paused => self.play(),
            _ => {}
        }
    }

    pub fn play(&mut self) {
        // Restart from the top when the scrubber sits at the end
        if self.surface.scrubber_position() >= 1.0 {
            self.adapter.seek_to_ratio(0.0);
        }
        self.adapter.play();
    }

    pub fn pause(&mut self) {
        self.adapter.pause();
    }

    /// Replay the current item from position zero.
    pub fn replay(&mut self) {
        self.adapter.seek_to_ratio(0.0);
        self.surface.set_scrubber_position(0.0);
        self.adapter.play();
    }

    pub fn seek_to_ratio(&mut self, ratio: f64) {
        self.adapter.seek_to_ratio(ratio);
    }

    pub fn skip_by(&mut self, seconds: f64) {
        self.adapter.skip_by(seconds);
    }

    pub fn skip_forward(&mut self) {
        let seconds = self.skip_seconds();
        self.adapter.skip_by(seconds);
    }

    pub fn skip_backward(&mut self) {
        let seconds = self.skip_seconds();
        self.adapter.skip_by(-seconds);
    }

    /// Stop playback and return to idle with paused visuals.
    pub fn stop(&mut self) {
        self.adapter.pause();
        self.set_status(PlayerStatus::Idle);
    }

    /// Detach the render surface from the inline layer, lending live
    /// playback to the fullscreen presentation. Playback continues.
    pub fn prepare_for_fullscreen(&mut self) -> FullscreenLease {
        self.adapter.detach_renderer();
        FullscreenLease {
            was_playing: self.status.is_playing(),
        }
    }

    /// Reattach the inline render surface after fullscreen ends.
    ///
    /// When the lease was playing, resume is deferred by the settle delay
    /// and issued from `pump` once the deadline passes.
    pub fn restore_from_fullscreen(&mut self, lease: FullscreenLease) {
        self.adapter.attach_renderer();
        if lease.was_playing {
            self.pending_resume = Some(Instant::now() + self.settle_delay);
        }
    }

    /// Reconcile queued engine events, thumbnail results and timers with
    /// the session state. Returns the signals produced, in order. Must be
    /// called from the single orchestrator thread; never blocks.
    pub fn pump(&mut self) -> Vec<PlayerSignal> {
        if let Some(deadline) = self.pending_resume {
            if Instant::now() >= deadline {
                self.pending_resume = None;
                self.adapter.play();
            }
        }

        while let Some(event) = self.adapter.try_next_event() {
            self.handle_engine_event(event);
        }

        while let Ok(result) = self.thumb_results.try_recv() {
            self.handle_thumbnail(result);
        }

        std::mem::take(&mut self.signals)
    }

    fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Status { item, status } => {
                if !self.adapter.is_active(item) {
                    log::trace!("ignoring status for superseded item {:?}", item);
                    return;
                }
                let next = match status {
                    EngineStatus::Loading => PlayerStatus::Loading,
                    EngineStatus::Playing => PlayerStatus::Playing,
                    EngineStatus::Paused => PlayerStatus::Paused,
                };
                // `stop` pauses the engine after going idle; the trailing
                // pause report must not revive the session.
                if self.status.is_idle() && next.is_paused() {
                    log::trace!("ignoring pause report for a stopped player");
                    return;
                }
                self.set_status(next);
            }
            EngineEvent::Ready { item, duration } => {
                self.cache.mark_ready(item, duration);
                if self.adapter.is_active(item) {
                    if let Some(duration) = duration.or_else(|| self.adapter.duration()) {
                        self.now_info.duration = Some(duration);
                        self.now_playing.update(&self.now_info);
                    }
                }
            }
            EngineEvent::Failed { item, reason } => {
                if self.adapter.is_active(item) {
                    self.set_status(PlayerStatus::Failed(reason));
                } else if self.cache.mark_failed(item) {
                    log::debug!("look-ahead item {:?} failed: {}", item, reason);
                } else {
                    log::trace!("ignoring failure for superseded item {:?}", item);
                }
            }
            EngineEvent::Progress {
                item,
                elapsed,
                duration,
            } => {
                if self.adapter.is_active(item) {
                    self.handle_progress(elapsed, duration);
                }
            }
            EngineEvent::Completed { item } => {
                if self.adapter.is_active(item) {
                    self.signals.push(PlayerSignal::Completed);
                }
            }
        }
    }

    fn handle_progress(&mut self, elapsed: Duration, duration: Duration) {
        self.surface
            .set_time_labels(&format_position(elapsed), &format_position(duration));
        if !self.surface.is_scrubbing() {
            let total = duration.as_secs_f64();
            if total > 0.0 {
                self.surface
                    .set_scrubber_position((elapsed.as_secs_f64() / total).clamp(0.0, 1.0));
            }
        }

        self.now_info.elapsed = Some(elapsed);
        self.now_info.duration = Some(duration);
        if self.now_playing_throttle.ready() {
            self.now_playing.update(&self.now_info);
        }
    }

    fn handle_thumbnail(&mut self, result: ThumbnailResult) {
        let Some(current) = &self.current else {
            return;
        };
        if current.url != result.item_url {
            log::trace!("dropping thumbnail for superseded item {}", result.item_url);
            return;
        }
        match result.image {
            Some(bytes) => self.surface.set_artwork(Artwork::Image(bytes)),
            None => {
                let kind = media_kind(current);
                self.surface.set_artwork(Artwork::Placeholder(kind));
            }
        }
    }

    fn set_status(&mut self, status: PlayerStatus) {
        if self.status == status {
            return;
        }
        if !self.status.can_transition(&status) {
            log::debug!(
                "unusual status transition {:?} -> {:?}",
                self.status,
                status
            );
        }
        log::debug!("player status changed to {:?}", status);
        self.status = status.clone();
        self.project_status();
        self.signals.push(PlayerSignal::Status(status));
    }

    /// Map the current status onto the surface and now-playing sink.
    fn project_status(&mut self) {
        match &self.status {
            PlayerStatus::Loading => {
                self.surface.set_loading(true);
            }
            PlayerStatus::Playing => {
                self.surface.set_loading(false);
                if let Some(icon) = self.surface.settings().pause_icon.clone() {
                    self.surface.set_play_pause_icon(&icon);
                }
                self.now_info.playing = true;
                self.now_playing.update(&self.now_info);
            }
            PlayerStatus::Paused => {
                self.surface.set_loading(false);
                if let Some(icon) = self.surface.settings().play_icon.clone() {
                    self.surface.set_play_pause_icon(&icon);
                }
                // Final snapshot so the OS surface freezes at the right spot
                self.now_info.playing = false;
                self.now_info.elapsed = Some(self.adapter.position());
                self.now_playing.update(&self.now_info);
            }
            PlayerStatus::Idle => {
                self.surface.set_loading(false);
                if let Some(icon) = self.surface.settings().play_icon.clone() {
                    self.surface.set_play_pause_icon(&icon);
                }
                self.now_info.playing = false;
                self.now_playing.update(&self.now_info);
            }
            PlayerStatus::Failed(_) => {
                self.surface.set_loading(false);
            }
        }
    }

    /// Push labels, artwork and fullscreen availability for a new item.
    fn refresh_surface(&mut self, item: &PlayableItem) {
        self.surface
            .set_track_labels(&item.display_title(), &item.display_description());

        let video = item.is_video();
        self.surface.set_fullscreen_available(video);
        self.surface.show_video_layer(video);

        if !video {
            match &item.thumbnail {
                Some(source) => {
                    self.thumbnails
                        .request(source, &item.url, self.thumb_reply.clone());
                }
                None => {
                    self.surface
                        .set_artwork(Artwork::Placeholder(MediaKind::Audio));
                }
            }
        }
    }

    fn push_initial_now_playing(&mut self, item: &PlayableItem, duration: Option<Duration>) {
        self.now_info = NowPlayingInfo {
            title: Some(item.display_description()),
            artist: item.album.clone(),
            duration: duration.or_else(|| self.adapter.duration()),
            elapsed: Some(Duration::ZERO),
            playing: false,
            artwork: item.thumbnail.clone(),
        };
        self.now_playing.update(&self.now_info);
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.cache.clear(&mut self.adapter);
        self.now_playing.detach();
        log::debug!("orchestrator torn down");
    }
}

fn media_kind(item: &PlayableItem) -> MediaKind {
    if item.is_video() {
        MediaKind::Video
    } else {
        MediaKind::Audio
    }
}
