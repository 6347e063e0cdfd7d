// Player status and playback progress

use std::time::Duration;

/// Observable status of the player orchestrator.
///
/// `Failed` carries a human-readable reason suitable for surfacing to the
/// host (no internet, invalid playback URL, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    /// No item loaded
    Idle,
    /// Engine is preparing or buffering the current item
    Loading,
    /// Current item is playing
    Playing,
    /// Current item is paused
    Paused,
    /// Playback failed for a reason
    Failed(String),
}

impl PlayerStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlayerStatus::Playing)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PlayerStatus::Paused)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PlayerStatus::Idle)
    }

    /// Whether a transition to `next` is meaningful.
    ///
    /// Failure and idling are reachable from anywhere; otherwise the player
    /// only walks Idle -> Loading -> Playing <-> Paused.
    pub fn can_transition(&self, next: &PlayerStatus) -> bool {
        use PlayerStatus::*;
        match (self, next) {
            (_, Failed(_)) | (_, Idle) | (_, Loading) => true,
            (Loading, Playing) | (Loading, Paused) => true,
            (Playing, Paused) | (Paused, Playing) => true,
            (Failed(_), _) => true,
            (a, b) => a == b,
        }
    }
}

/// A single progress tick: how far into the item playback is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackProgress {
    pub elapsed: Duration,
    pub duration: Duration,
}

impl PlaybackProgress {
    /// Position as a fraction of the duration, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        let total = self.duration.as_secs_f64();
        if total <= 0.0 {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / total).clamp(0.0, 1.0)
    }
}

/// Format a position as `MM:SS`, or `H:MM:SS` once it crosses the hour.
pub fn format_position(position: Duration) -> String {
    let total = position.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
