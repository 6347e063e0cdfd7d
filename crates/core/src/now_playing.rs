// System now-playing surface and remote commands

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::item::ImageSource;

/// Snapshot of the current track pushed to the OS media-info surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlayingInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<Duration>,
    pub elapsed: Option<Duration>,
    pub playing: bool,
    pub artwork: Option<ImageSource>,
}

/// OS-level surface displaying current track metadata and transport
/// controls outside the app (lock screen, control center).
///
/// One-way: the component pushes snapshots; commands from the OS come back
/// through the remote command channel.
pub trait NowPlayingSink: Send {
    /// Register with the OS media session
    fn attach(&mut self);

    /// Unregister; no further updates are delivered
    fn detach(&mut self);

    /// Push a metadata snapshot
    fn update(&mut self, info: &NowPlayingInfo);
}

/// Sink that ignores everything, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct NoopNowPlayingSink;

impl NowPlayingSink for NoopNowPlayingSink {
    fn attach(&mut self) {}
    fn detach(&mut self) {}
    fn update(&mut self, _info: &NowPlayingInfo) {}
}

/// Remote command routed back from the OS media session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoteCommand {
    Play,
    Pause,
    TogglePlayPause,
    Next,
    Previous,
    SkipForward,
    SkipBackward,
    /// Seek to a fraction of the duration
    SeekTo(f64),
}

/// Sending half of the remote command channel, held by the host's
/// now-playing sink implementation.
#[derive(Clone, Debug)]
pub struct RemoteCommandSender {
    sender: Sender<RemoteCommand>,
}

impl RemoteCommandSender {
    /// Emit a command; silent if the controller is gone.
    pub fn emit(&self, command: RemoteCommand) {
        let _ = self.sender.send(command);
    }
}

/// Receiving half, drained by the playlist controller.
#[derive(Debug)]
pub struct RemoteCommandReceiver {
    receiver: Receiver<RemoteCommand>,
}

impl RemoteCommandReceiver {
    /// Next pending command, if any. Never blocks.
    pub fn try_next(&self) -> Option<RemoteCommand> {
        match self.receiver.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Create a connected remote-command channel pair.
pub fn remote_command_channel() -> (RemoteCommandSender, RemoteCommandReceiver) {
    let (sender, receiver) = unbounded();
    (
        RemoteCommandSender { sender },
        RemoteCommandReceiver { receiver },
    )
}
