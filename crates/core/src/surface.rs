// Player surface capability: the mutable UI elements the component drives

use crate::item::ImageSource;
use crate::settings::PlayerSettings;

/// Broad media kind, used to pick a default placeholder image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// What the display region should show for the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artwork {
    /// Encoded image bytes, decoded and rendered by the surface
    Image(Vec<u8>),
    /// The surface's built-in placeholder for the media kind
    Placeholder(MediaKind),
}

/// A control tap forwarded by the host from the surface's buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    PlayPause,
    Next,
    Previous,
    SkipForward,
    SkipBackward,
    /// Scrub to a position expressed as a fraction of the duration
    SeekTo(f64),
}

/// The on-screen player widget set, consumed as a capability.
///
/// The component only mutates display state through this trait; the
/// concrete layout, buttons and gesture wiring stay with the host, which
/// forwards taps as [`ControlAction`]s.
pub trait PlayerSurface {
    /// Settings to apply to the player
    fn settings(&self) -> &PlayerSettings;

    /// Title and description labels for the current item
    fn set_track_labels(&mut self, title: &str, description: &str);

    /// Current-time and duration labels, already formatted
    fn set_time_labels(&mut self, elapsed: &str, duration: &str);

    /// Scrubber position as a fraction in `[0, 1]`
    fn set_scrubber_position(&mut self, ratio: f64);

    /// Whether the user is currently dragging the scrubber; positions are
    /// not pushed while this is true
    fn is_scrubbing(&self) -> bool;

    /// Current scrubber position as last shown
    fn scrubber_position(&self) -> f64;

    /// Swap the play/pause button image
    fn set_play_pause_icon(&mut self, icon: &ImageSource);

    /// Show or hide the loading spinner and disable transport controls
    /// while loading
    fn set_loading(&mut self, loading: bool);

    /// Fullscreen is only offered for video items
    fn set_fullscreen_available(&mut self, available: bool);

    /// Image shown in the display region while playing audio
    fn set_artwork(&mut self, artwork: Artwork);

    /// Toggle between the video render layer and the artwork image
    fn show_video_layer(&mut self, video: bool);
}
