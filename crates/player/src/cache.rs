// Look-ahead cache: keeps the (previous, current, next) triad warm

use std::collections::HashMap;

use castkit_core::{PlayableItem, Result};
use castkit_engine_api::{EngineItem, EngineItemId, PrepareMode};

use crate::adapter::EngineAdapter;

/// The item window kept warm for low-latency navigation.
#[derive(Debug, Clone, Copy)]
pub struct Triad<'a> {
    pub previous: Option<&'a PlayableItem>,
    pub current: &'a PlayableItem,
    pub next: Option<&'a PlayableItem>,
}

/// Cache of prepared engine items keyed by resource URL.
///
/// Bounded to the triad: every `replace` rebuilds the map from scratch and
/// discards stale entries (and their engine observers) outside the new
/// window. Only adjacent-track skipping benefits; arbitrary jumps always
/// miss and pay a blocking prepare.
pub struct LookaheadCache {
    entries: HashMap<String, EngineItem>,
}

impl LookaheadCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Replace the whole window with a new triad.
    ///
    /// Hits from the old window are reused verbatim, skipping
    /// re-preparation and duplicate observer registration. The current
    /// item is prepared blocking and its failure propagates; neighbors
    /// are prepared in the background, best-effort, with silent failure —
    /// a missing entry simply costs a blocking prepare on the next
    /// navigation.
    pub fn replace(&mut self, triad: &Triad, adapter: &mut EngineAdapter) -> Result<EngineItem> {
        let mut old = std::mem::take(&mut self.entries);

        let current = match old.remove(&triad.current.url) {
            Some(hit) => hit,
            None => match adapter.prepare(&triad.current.url, PrepareMode::Blocking) {
                Ok(item) => item,
                Err(err) => {
                    // Nothing changed; keep the old window alive.
                    self.entries = old;
                    return Err(err);
                }
            },
        };

        let mut fresh = HashMap::with_capacity(3);
        fresh.insert(current.url.clone(), current.clone());

        for neighbor in [triad.previous, triad.next].into_iter().flatten() {
            if fresh.contains_key(&neighbor.url) {
                continue;
            }
            if let Some(hit) = old.remove(&neighbor.url) {
                fresh.insert(neighbor.url.clone(), hit);
            } else {
                match adapter.prepare(&neighbor.url, PrepareMode::Background) {
                    Ok(item) => {
                        fresh.insert(neighbor.url.clone(), item);
                    }
                    Err(err) => {
                        log::debug!("look-ahead prepare failed for {}: {}", neighbor.url, err);
                    }
                }
            }
        }

        // Entries outside the new window lose their engine observers here.
        for stale in old.values() {
            adapter.discard(stale);
        }

        self.entries = fresh;
        Ok(current)
    }

    /// O(1) lookup by resource URL.
    pub fn lookup(&self, url: &str) -> Option<&EngineItem> {
        self.entries.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record that a background prepare became ready.
    pub fn mark_ready(
        &mut self,
        id: EngineItemId,
        duration: Option<std::time::Duration>,
    ) -> bool {
        for entry in self.entries.values_mut() {
            if entry.id == id {
                entry.state = castkit_engine_api::LoadState::Ready;
                if entry.duration.is_none() {
                    entry.duration = duration;
                }
                return true;
            }
        }
        false
    }

    /// Drop a look-ahead entry whose background prepare failed, so the
    /// next navigation re-prepares it on demand.
    pub fn mark_failed(&mut self, id: EngineItemId) -> bool {
        let url = self
            .entries
            .iter()
            .find(|(_, entry)| entry.id == id)
            .map(|(url, _)| url.clone());
        match url {
            Some(url) => {
                self.entries.remove(&url);
                true
            }
            None => false,
        }
    }

    /// Discard every entry and its observers.
    pub fn clear(&mut self, adapter: &mut EngineAdapter) {
        for entry in self.entries.values() {
            adapter.discard(entry);
        }
        self.entries.clear();
    }
}

impl Default for LookaheadCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use castkit_core::{PlayerError, Result};
    use castkit_engine_api::{EngineEventSender, LoadState, MediaEngine};

    #[derive(Default)]
    struct StubState {
        prepared: Vec<(String, PrepareMode)>,
        discarded: Vec<EngineItemId>,
        next_id: u64,
        fail_urls: Vec<String>,
    }

    struct StubEngine {
        state: Arc<Mutex<StubState>>,
    }

    impl MediaEngine for StubEngine {
        fn set_event_sender(&mut self, _sender: EngineEventSender) {}

        fn prepare(&mut self, url: &str, mode: PrepareMode) -> Result<EngineItem> {
            let mut state = self.state.lock();
            if mode == PrepareMode::Blocking && state.fail_urls.iter().any(|u| u == url) {
                return Err(PlayerError::Unplayable(format!("bad url {}", url)));
            }
            state.next_id += 1;
            let id = EngineItemId(state.next_id);
            state.prepared.push((url.to_string(), mode));
            Ok(EngineItem {
                id,
                url: url.to_string(),
                state: if mode == PrepareMode::Blocking {
                    LoadState::Ready
                } else {
                    LoadState::Unknown
                },
                duration: None,
            })
        }

        fn activate(&mut self, _item: EngineItemId) {}
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn seek(&mut self, _position: Duration) {}
        fn position(&self) -> Duration {
            Duration::ZERO
        }
        fn duration(&self) -> Option<Duration> {
            None
        }
        fn discard(&mut self, item: EngineItemId) {
            self.state.lock().discarded.push(item);
        }
        fn detach_renderer(&mut self) {}
        fn attach_renderer(&mut self) {}
    }

    fn setup() -> (Arc<Mutex<StubState>>, EngineAdapter, LookaheadCache) {
        let state = Arc::new(Mutex::new(StubState::default()));
        let adapter = EngineAdapter::new(Box::new(StubEngine {
            state: state.clone(),
        }));
        (state, adapter, LookaheadCache::new())
    }

    fn item(url: &str) -> PlayableItem {
        PlayableItem::new(url, None, None, None)
    }

    #[test]
    fn replace_holds_exactly_the_triad() {
        let (_, mut adapter, mut cache) = setup();
        let (a, b, c) = (item("a.mp3"), item("b.mp3"), item("c.mp3"));

        cache
            .replace(
                &Triad {
                    previous: Some(&a),
                    current: &b,
                    next: Some(&c),
                },
                &mut adapter,
            )
            .unwrap();

        assert_eq!(cache.len(), 3);
        assert!(cache.contains("a.mp3"));
        assert!(cache.contains("b.mp3"));
        assert!(cache.contains("c.mp3"));
    }

    #[test]
    fn replace_drops_entries_outside_the_new_window() {
        let (state, mut adapter, mut cache) = setup();
        let (a, b, c, d) = (item("a.mp3"), item("b.mp3"), item("c.mp3"), item("d.mp3"));

        cache
            .replace(
                &Triad {
                    previous: Some(&a),
                    current: &b,
                    next: Some(&c),
                },
                &mut adapter,
            )
            .unwrap();
        let stale_id = cache.lookup("a.mp3").unwrap().id;

        cache
            .replace(
                &Triad {
                    previous: Some(&b),
                    current: &c,
                    next: Some(&d),
                },
                &mut adapter,
            )
            .unwrap();

        assert!(!cache.contains("a.mp3"));
        assert_eq!(cache.len(), 3);
        assert!(state.lock().discarded.contains(&stale_id));
    }

    #[test]
    fn adjacent_navigation_reuses_hits_without_re_preparing() {
        let (state, mut adapter, mut cache) = setup();
        let (a, b, c) = (item("a.mp3"), item("b.mp3"), item("c.mp3"));

        cache
            .replace(
                &Triad {
                    previous: None,
                    current: &a,
                    next: Some(&b),
                },
                &mut adapter,
            )
            .unwrap();
        let warm_id = cache.lookup("b.mp3").unwrap().id;
        let prepares_before = state.lock().prepared.len();

        let current = cache
            .replace(
                &Triad {
                    previous: Some(&a),
                    current: &b,
                    next: Some(&c),
                },
                &mut adapter,
            )
            .unwrap();

        // b was a hit: same handle, only c was newly prepared
        assert_eq!(current.id, warm_id);
        assert_eq!(state.lock().prepared.len(), prepares_before + 1);
    }

    #[test]
    fn blocking_failure_leaves_the_old_window_intact() {
        let (state, mut adapter, mut cache) = setup();
        let (a, b) = (item("a.mp3"), item("bad.mp3"));

        cache
            .replace(
                &Triad {
                    previous: None,
                    current: &a,
                    next: None,
                },
                &mut adapter,
            )
            .unwrap();
        state.lock().fail_urls.push("bad.mp3".to_string());

        let result = cache.replace(
            &Triad {
                previous: None,
                current: &b,
                next: None,
            },
            &mut adapter,
        );

        assert!(matches!(result, Err(PlayerError::Unplayable(_))));
        assert!(cache.contains("a.mp3"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_lookahead_entry_is_evicted() {
        let (_, mut adapter, mut cache) = setup();
        let (a, b) = (item("a.mp3"), item("b.mp3"));

        cache
            .replace(
                &Triad {
                    previous: None,
                    current: &a,
                    next: Some(&b),
                },
                &mut adapter,
            )
            .unwrap();
        let lookahead_id = cache.lookup("b.mp3").unwrap().id;

        assert!(cache.mark_failed(lookahead_id));
        assert!(!cache.contains("b.mp3"));
        assert!(!cache.mark_failed(lookahead_id));
    }
}
