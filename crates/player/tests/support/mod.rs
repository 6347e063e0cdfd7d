// Shared fakes for controller-level tests: a scripted engine, recording
// surface/delegate/sink, and a vector-backed playlist source.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use castkit_core::{
    Artwork, ImageSource, NowPlayingInfo, NowPlayingSink, PlayableItem, PlayerDelegate,
    PlayerError, PlayerSettings, PlayerSurface, PlaylistSource, Result, SkipReason,
};
use castkit_engine_api::{
    EngineEvent, EngineEventSender, EngineItem, EngineItemId, EngineStatus, LoadState,
    MediaEngine, PrepareMode,
};
use castkit_player::{HttpThumbnailProvider, Orchestrator, PlayerController};

pub const DEFAULT_DURATION: Duration = Duration::from_secs(300);

#[derive(Default)]
pub struct EngineState {
    pub sender: EngineEventSender,
    pub next_id: u64,
    pub prepared: Vec<(String, PrepareMode)>,
    pub discarded: Vec<EngineItemId>,
    pub active: Option<EngineItemId>,
    pub items: HashMap<EngineItemId, String>,
    pub fail_urls: Vec<String>,
    pub position: Duration,
    pub playing: bool,
    pub play_calls: usize,
    pub seeks: Vec<Duration>,
    pub renderer_detached: bool,
}

impl EngineState {
    pub fn emit(&self, event: EngineEvent) {
        self.sender.emit(event);
    }

    pub fn active_id(&self) -> EngineItemId {
        self.active.expect("no active engine item")
    }
}

/// Engine whose transport commands synchronously post the status events a
/// real engine would report.
pub struct FakeEngine {
    state: Arc<Mutex<EngineState>>,
}

impl FakeEngine {
    pub fn new() -> (Box<dyn MediaEngine>, Arc<Mutex<EngineState>>) {
        let state = Arc::new(Mutex::new(EngineState::default()));
        (
            Box::new(FakeEngine {
                state: state.clone(),
            }),
            state,
        )
    }
}

impl MediaEngine for FakeEngine {
    fn set_event_sender(&mut self, sender: EngineEventSender) {
        self.state.lock().sender = sender;
    }

    fn prepare(&mut self, url: &str, mode: PrepareMode) -> Result<EngineItem> {
        let mut state = self.state.lock();
        if mode == PrepareMode::Blocking && state.fail_urls.iter().any(|u| u == url) {
            return Err(PlayerError::Unplayable(format!("cannot load {}", url)));
        }
        state.next_id += 1;
        let id = EngineItemId(state.next_id);
        state.items.insert(id, url.to_string());
        state.prepared.push((url.to_string(), mode));
        Ok(match mode {
            PrepareMode::Blocking => EngineItem {
                id,
                url: url.to_string(),
                state: LoadState::Ready,
                duration: Some(DEFAULT_DURATION),
            },
            PrepareMode::Background => EngineItem {
                id,
                url: url.to_string(),
                state: LoadState::Unknown,
                duration: None,
            },
        })
    }

    fn activate(&mut self, item: EngineItemId) {
        let mut state = self.state.lock();
        state.active = Some(item);
        state.position = Duration::ZERO;
        state.emit(EngineEvent::Status {
            item,
            status: EngineStatus::Loading,
        });
    }

    fn play(&mut self) {
        let mut state = self.state.lock();
        let Some(item) = state.active else { return };
        state.playing = true;
        state.play_calls += 1;
        state.emit(EngineEvent::Status {
            item,
            status: EngineStatus::Playing,
        });
    }

    fn pause(&mut self) {
        let mut state = self.state.lock();
        let Some(item) = state.active else { return };
        state.playing = false;
        state.emit(EngineEvent::Status {
            item,
            status: EngineStatus::Paused,
        });
    }

    fn seek(&mut self, position: Duration) {
        let mut state = self.state.lock();
        state.seeks.push(position);
        state.position = position.min(DEFAULT_DURATION);
    }

    fn position(&self) -> Duration {
        self.state.lock().position
    }

    fn duration(&self) -> Option<Duration> {
        let state = self.state.lock();
        state.active.map(|_| DEFAULT_DURATION)
    }

    fn discard(&mut self, item: EngineItemId) {
        let mut state = self.state.lock();
        state.discarded.push(item);
        state.items.remove(&item);
        if state.active == Some(item) {
            state.active = None;
        }
    }

    fn detach_renderer(&mut self) {
        self.state.lock().renderer_detached = true;
    }

    fn attach_renderer(&mut self) {
        self.state.lock().renderer_detached = false;
    }
}

#[derive(Default)]
pub struct SurfaceState {
    pub title: String,
    pub description: String,
    pub elapsed: String,
    pub duration: String,
    pub scrubber: f64,
    pub scrubbing: bool,
    pub icon: Option<ImageSource>,
    pub loading: bool,
    pub fullscreen_available: bool,
    pub artwork: Option<Artwork>,
    pub video_layer: bool,
}

pub struct FakeSurface {
    settings: PlayerSettings,
    state: Arc<Mutex<SurfaceState>>,
}

impl FakeSurface {
    pub fn new(settings: PlayerSettings) -> (Box<dyn PlayerSurface>, Arc<Mutex<SurfaceState>>) {
        let state = Arc::new(Mutex::new(SurfaceState::default()));
        (
            Box::new(FakeSurface {
                settings,
                state: state.clone(),
            }),
            state,
        )
    }
}

impl PlayerSurface for FakeSurface {
    fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    fn set_track_labels(&mut self, title: &str, description: &str) {
        let mut state = self.state.lock();
        state.title = title.to_string();
        state.description = description.to_string();
    }

    fn set_time_labels(&mut self, elapsed: &str, duration: &str) {
        let mut state = self.state.lock();
        state.elapsed = elapsed.to_string();
        state.duration = duration.to_string();
    }

    fn set_scrubber_position(&mut self, ratio: f64) {
        self.state.lock().scrubber = ratio;
    }

    fn is_scrubbing(&self) -> bool {
        self.state.lock().scrubbing
    }

    fn scrubber_position(&self) -> f64 {
        self.state.lock().scrubber
    }

    fn set_play_pause_icon(&mut self, icon: &ImageSource) {
        self.state.lock().icon = Some(icon.clone());
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.lock().loading = loading;
    }

    fn set_fullscreen_available(&mut self, available: bool) {
        self.state.lock().fullscreen_available = available;
    }

    fn set_artwork(&mut self, artwork: Artwork) {
        self.state.lock().artwork = Some(artwork);
    }

    fn show_video_layer(&mut self, video: bool) {
        self.state.lock().video_layer = video;
    }
}

#[derive(Default)]
pub struct DelegateLog {
    pub started: Vec<usize>,
    pub paused: Vec<usize>,
    pub skipped: Vec<(usize, SkipReason)>,
    pub skipped_forward: Vec<usize>,
    pub skipped_backward: Vec<usize>,
    pub denied_indices: Vec<usize>,
}

pub struct RecordingDelegate {
    pub log: Arc<Mutex<DelegateLog>>,
}

impl RecordingDelegate {
    pub fn new() -> (Arc<Self>, Arc<Mutex<DelegateLog>>) {
        let log = Arc::new(Mutex::new(DelegateLog::default()));
        (Arc::new(RecordingDelegate { log: log.clone() }), log)
    }
}

impl PlayerDelegate for RecordingDelegate {
    fn skipped_forward(&self, _item: &PlayableItem, index: usize) {
        self.log.lock().skipped_forward.push(index);
    }

    fn skipped_backward(&self, _item: &PlayableItem, index: usize) {
        self.log.lock().skipped_backward.push(index);
    }

    fn started_playing(&self, _item: &PlayableItem, index: usize) {
        self.log.lock().started.push(index);
    }

    fn paused(&self, _item: &PlayableItem, index: usize) {
        self.log.lock().paused.push(index);
    }

    fn skipped_entirely(&self, index: usize, reason: &SkipReason) {
        self.log.lock().skipped.push((index, reason.clone()));
    }

    fn can_play(&self, _item: &PlayableItem, index: usize) -> bool {
        !self.log.lock().denied_indices.contains(&index)
    }
}

#[derive(Default)]
pub struct SinkState {
    pub attached: bool,
    pub updates: Vec<NowPlayingInfo>,
}

pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
}

impl RecordingSink {
    pub fn new() -> (Box<dyn NowPlayingSink>, Arc<Mutex<SinkState>>) {
        let state = Arc::new(Mutex::new(SinkState::default()));
        (
            Box::new(RecordingSink {
                state: state.clone(),
            }),
            state,
        )
    }
}

impl NowPlayingSink for RecordingSink {
    fn attach(&mut self) {
        self.state.lock().attached = true;
    }

    fn detach(&mut self) {
        self.state.lock().attached = false;
    }

    fn update(&mut self, info: &NowPlayingInfo) {
        self.state.lock().updates.push(info.clone());
    }
}

pub struct VecSource {
    pub items: Vec<PlayableItem>,
}

impl PlaylistSource for VecSource {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Option<PlayableItem> {
        self.items.get(index).cloned()
    }
}

pub struct Harness {
    pub controller: PlayerController,
    pub engine: Arc<Mutex<EngineState>>,
    pub surface: Arc<Mutex<SurfaceState>>,
    pub delegate: Arc<Mutex<DelegateLog>>,
    pub sink: Arc<Mutex<SinkState>>,
}

pub fn audio_item(url: &str) -> PlayableItem {
    PlayableItem::new(url, None, Some("Show".to_string()), Some(url.to_string()))
}

pub fn harness_with_items(items: Vec<PlayableItem>, settings: PlayerSettings) -> Harness {
    let (engine, engine_state) = FakeEngine::new();
    let (surface, surface_state) = FakeSurface::new(settings);
    let (sink, sink_state) = RecordingSink::new();
    let (delegate, delegate_log) = RecordingDelegate::new();

    let orchestrator = Orchestrator::new(
        engine,
        surface,
        sink,
        Box::new(HttpThumbnailProvider::new()),
    );
    let controller = PlayerController::new(Box::new(VecSource { items }), delegate, orchestrator);

    Harness {
        controller,
        engine: engine_state,
        surface: surface_state,
        delegate: delegate_log,
        sink: sink_state,
    }
}

pub fn harness(urls: &[&str]) -> Harness {
    harness_with_items(
        urls.iter().map(|url| audio_item(url)).collect(),
        PlayerSettings::default(),
    )
}
