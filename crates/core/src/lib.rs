// Core types and capability traits for the castkit player component

pub mod delegate;
pub mod error;
pub mod item;
pub mod now_playing;
pub mod settings;
pub mod state;
pub mod surface;

// Re-export commonly used types
pub use delegate::{PlayerDelegate, PlaylistSource, SkipReason};
pub use error::{PlayerError, Result};
pub use item::{ImageSource, PlayableItem};
pub use now_playing::{
    remote_command_channel, NoopNowPlayingSink, NowPlayingInfo, NowPlayingSink, RemoteCommand,
    RemoteCommandReceiver, RemoteCommandSender,
};
pub use settings::PlayerSettings;
pub use state::{format_position, PlaybackProgress, PlayerStatus};
pub use surface::{Artwork, ControlAction, MediaKind, PlayerSurface};
