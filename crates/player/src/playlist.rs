// Playlist controller: index bookkeeping, navigation policy and host
// mediation around the orchestrator

use std::sync::Arc;

use castkit_core::{
    ControlAction, PlayableItem, PlayerDelegate, PlayerStatus, PlaylistSource, RemoteCommand,
    RemoteCommandReceiver, SkipReason,
};

use crate::orchestrator::{FullscreenLease, Orchestrator, PlayerSignal};

/// Owns the ordered item list (through an external data source), the
/// current-index bookkeeping and the orchestrator lifecycle.
///
/// Hosts drive it from their UI thread: forward control taps with
/// [`PlayerController::handle_control`] and call
/// [`PlayerController::process_events`] regularly (per frame or on channel
/// readiness) so engine events, remote commands and playback policies are
/// applied.
pub struct PlayerController {
    source: Box<dyn PlaylistSource>,
    delegate: Arc<dyn PlayerDelegate>,
    orchestrator: Orchestrator,
    remote: Option<RemoteCommandReceiver>,
    item_count: usize,
    current_index: Option<usize>,
    current_item: Option<PlayableItem>,
    in_fullscreen: bool,
}

impl PlayerController {
    pub fn new(
        source: Box<dyn PlaylistSource>,
        delegate: Arc<dyn PlayerDelegate>,
        orchestrator: Orchestrator,
    ) -> Self {
        Self {
            source,
            delegate,
            orchestrator,
            remote: None,
            item_count: 0,
            current_index: None,
            current_item: None,
            in_fullscreen: false,
        }
    }

    /// Wire the receiving half of a remote command channel; commands are
    /// drained in `process_events` and re-enter the same operations as the
    /// surface controls.
    pub fn set_remote_commands(&mut self, receiver: RemoteCommandReceiver) {
        self.remote = Some(receiver);
    }

    /// Index of the item currently playing; `None` when no item is loaded.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.current_item.as_ref()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn status(&self) -> &PlayerStatus {
        self.orchestrator.status()
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut Orchestrator {
        &mut self.orchestrator
    }

    /// Reload the list from the data source.
    ///
    /// With an empty source the orchestrator is left idle; otherwise
    /// playback starts at index 0.
    pub fn reload(&mut self) {
        self.current_index = None;
        self.current_item = None;
        self.item_count = self.source.len();
        if self.item_count == 0 {
            log::info!("playlist reloaded empty");
            self.orchestrator.stop();
            return;
        }
        log::info!("playlist reloaded with {} items", self.item_count);
        self.change_track(0);
    }

    /// Switch playback to the item at `index`.
    ///
    /// Fails silently (returns `false`, no state change) when the index is
    /// out of range, the data source cannot produce the item, or the host's
    /// gating query denies it.
    pub fn change_track(&mut self, index: usize) -> bool {
        if index >= self.item_count {
            return false;
        }
        let Some(item) = self.source.item_at(index) else {
            log::error!("data source has no item at index {}", index);
            return false;
        };
        if !self.delegate.can_play(&item, index) {
            log::debug!("host denied playback of item at index {}", index);
            return false;
        }

        let previous = if index > 0 {
            self.source.item_at(index - 1)
        } else {
            None
        };
        let next = if index + 1 < self.item_count {
            self.source.item_at(index + 1)
        } else {
            None
        };

        self.current_index = Some(index);
        self.current_item = Some(item.clone());
        self.orchestrator
            .start_item(&item, previous.as_ref(), next.as_ref());
        true
    }

    /// Advance to the next item. At the last index the current item is
    /// replayed from position zero instead of failing.
    pub fn next(&mut self) {
        let Some(index) = self.current_index else {
            return;
        };
        if self.change_track(index + 1) {
            self.delegate
                .skipped_entirely(index, &SkipReason::UserSkipped);
        } else if index + 1 >= self.item_count {
            self.orchestrator.replay();
        }
    }

    /// Go back to the previous item; silent no-op at the first index.
    pub fn previous(&mut self) {
        let Some(index) = self.current_index else {
            return;
        };
        if index == 0 {
            return;
        }
        if self.change_track(index - 1) {
            self.delegate
                .skipped_entirely(index, &SkipReason::UserSkipped);
        }
    }

    /// Forward a control tap from the surface.
    pub fn handle_control(&mut self, action: ControlAction) {
        match action {
            ControlAction::PlayPause => self.orchestrator.toggle_play_pause(),
            ControlAction::Next => self.next(),
            ControlAction::Previous => self.previous(),
            ControlAction::SkipForward => {
                self.orchestrator.skip_forward();
                if let (Some(item), Some(index)) = (&self.current_item, self.current_index) {
                    self.delegate.skipped_forward(item, index);
                }
            }
            ControlAction::SkipBackward => {
                self.orchestrator.skip_backward();
                if let (Some(item), Some(index)) = (&self.current_item, self.current_index) {
                    self.delegate.skipped_backward(item, index);
                }
            }
            ControlAction::SeekTo(ratio) => self.orchestrator.seek_to_ratio(ratio),
        }
    }

    /// Drain remote commands and orchestrator signals, applying the
    /// skip-on-failure and auto-advance policies. Call regularly from the
    /// thread that owns the controller.
    pub fn process_events(&mut self) {
        while let Some(command) = self.remote.as_ref().and_then(|r| r.try_next()) {
            self.handle_remote(command);
        }

        for signal in self.orchestrator.pump() {
            match signal {
                PlayerSignal::Status(PlayerStatus::Playing) => {
                    if let (Some(item), Some(index)) = (&self.current_item, self.current_index) {
                        self.delegate.started_playing(item, index);
                    }
                }
                PlayerSignal::Status(PlayerStatus::Paused) => {
                    if let (Some(item), Some(index)) = (&self.current_item, self.current_index) {
                        self.delegate.paused(item, index);
                    }
                }
                PlayerSignal::Status(PlayerStatus::Failed(reason)) => {
                    self.on_engine_failure(reason);
                }
                PlayerSignal::Status(_) => {}
                PlayerSignal::Completed => self.on_natural_completion(),
            }
        }
    }

    fn handle_remote(&mut self, command: RemoteCommand) {
        match command {
            RemoteCommand::Play => self.orchestrator.play(),
            RemoteCommand::Pause => self.orchestrator.pause(),
            RemoteCommand::TogglePlayPause => self.orchestrator.toggle_play_pause(),
            RemoteCommand::Next => self.next(),
            RemoteCommand::Previous => self.previous(),
            RemoteCommand::SkipForward => self.handle_control(ControlAction::SkipForward),
            RemoteCommand::SkipBackward => self.handle_control(ControlAction::SkipBackward),
            RemoteCommand::SeekTo(ratio) => self.orchestrator.seek_to_ratio(ratio),
        }
    }

    /// A failed item is skipped automatically and transparently; failure
    /// on the last item stops playback instead.
    fn on_engine_failure(&mut self, reason: String) {
        let Some(index) = self.current_index else {
            return;
        };
        log::warn!("item at index {} failed: {}", index, reason);
        self.delegate
            .skipped_entirely(index, &SkipReason::Error(reason));
        if !self.change_track(index + 1) {
            self.orchestrator.stop();
        }
    }

    fn on_natural_completion(&mut self) {
        let Some(index) = self.current_index else {
            return;
        };
        if self.orchestrator.auto_advance() && index + 1 < self.item_count {
            self.change_track(index + 1);
        } else {
            self.orchestrator.stop();
        }
    }

    /// Hand the live engine to a fullscreen presentation; playback
    /// continues uninterrupted.
    pub fn enter_fullscreen(&mut self) -> FullscreenLease {
        self.in_fullscreen = true;
        self.orchestrator.prepare_for_fullscreen()
    }

    /// Reclaim inline rendering after the fullscreen session ends.
    pub fn exit_fullscreen(&mut self, lease: FullscreenLease) {
        if !self.in_fullscreen {
            log::debug!("exit_fullscreen without a matching enter");
        }
        self.in_fullscreen = false;
        self.orchestrator.restore_from_fullscreen(lease);
    }

    pub fn is_fullscreen(&self) -> bool {
        self.in_fullscreen
    }
}
