// Data source and delegate capabilities at the component boundary

use crate::item::PlayableItem;

/// Why an entire item was skipped over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The user moved to another track
    UserSkipped,
    /// Playback failed with a reason such as: no internet, invalid
    /// playback url etc
    Error(String),
}

/// Provides the ordered list of items for playing.
///
/// Items are requested on demand and not retained beyond the triad that is
/// currently warm in the look-ahead cache.
pub trait PlaylistSource {
    /// Number of items in the list
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item to be played at a given index, `None` when the source cannot
    /// produce it
    fn item_at(&self, index: usize) -> Option<PlayableItem>;
}

/// Receives the player's lifecycle events.
///
/// All notification methods default to no-ops so hosts implement only what
/// they care about; `can_play` defaults to allowing every item.
pub trait PlayerDelegate: Send + Sync {
    /// The user jumped forward inside the current item
    fn skipped_forward(&self, item: &PlayableItem, index: usize) {
        let _ = (item, index);
    }

    /// The user jumped backward inside the current item
    fn skipped_backward(&self, item: &PlayableItem, index: usize) {
        let _ = (item, index);
    }

    /// An item started playing
    fn started_playing(&self, item: &PlayableItem, index: usize) {
        let _ = (item, index);
    }

    /// The current item was paused
    fn paused(&self, item: &PlayableItem, index: usize) {
        let _ = (item, index);
    }

    /// An entire item was skipped for a reason
    fn skipped_entirely(&self, index: usize, reason: &SkipReason) {
        let _ = (index, reason);
    }

    /// Gating query asked before switching to an item; a `false` aborts the
    /// switch without side effects
    fn can_play(&self, item: &PlayableItem, index: usize) -> bool {
        let _ = (item, index);
        true
    }
}
