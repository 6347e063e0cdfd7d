// Error handling for the player component

use std::fmt;

/// Player error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The resource is malformed or unreachable and cannot be prepared
    Unplayable(String),

    /// A navigation index outside the playlist bounds
    OutOfRange(i64),

    /// The host's gating query rejected the track change
    DeniedByHost,

    /// The expected player-surface ancestor was never found in the view tree
    MissingAncestor,

    /// A playback command was issued with no item loaded
    NoActiveItem,

    /// Network error while fetching auxiliary data (thumbnails)
    Network(String),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerError::Unplayable(msg) => write!(f, "Unplayable resource: {}", msg),
            PlayerError::OutOfRange(index) => write!(f, "Index out of range: {}", index),
            PlayerError::DeniedByHost => write!(f, "Track change denied by host"),
            PlayerError::MissingAncestor => {
                write!(f, "Player surface not found in the view ancestry")
            }
            PlayerError::NoActiveItem => write!(f, "No active item"),
            PlayerError::Network(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for PlayerError {}

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
