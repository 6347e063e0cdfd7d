// Player settings supplied by the hosting surface

use crate::item::ImageSource;

/// Settings applied to the player, provided by the surface implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    /// Icon shown on the play/pause button while paused
    pub play_icon: Option<ImageSource>,
    /// Icon shown on the play/pause button while playing
    pub pause_icon: Option<ImageSource>,
    /// Seconds to jump when the skip forward/backward controls are used
    pub skip_seconds: f64,
    /// Reserved for media download caching; look-ahead preparation is
    /// always on and not affected by this flag
    pub caching_enabled: bool,
    /// Play the next item automatically when the current one finishes
    pub auto_advance: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            play_icon: None,
            pause_icon: None,
            skip_seconds: 10.0,
            caching_enabled: false,
            auto_advance: true,
        }
    }
}
