//! Memo cache for loaded font bundles.
//!
//! One slot per cache key. A slot is a [`OnceCell`]: the first caller for a key
//! runs the fetch, later and concurrent callers await the same result. Slots
//! are never evicted; the cache lives as long as its owner.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::types::FontBundle;

type Slot = Arc<OnceCell<FontBundle>>;

/// Font bundle cache keyed by host, language codes and text segment.
#[derive(Debug, Default)]
pub struct FontCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key for one loader call: its arguments joined in call order.
    pub fn key(host: &str, language_codes: &str, text_segment: &str) -> String {
        format!("{host}:{language_codes}:{text_segment}")
    }

    /// Slot for `key`, created empty on first use.
    pub(crate) fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get(key) {
            return Arc::clone(slot);
        }
        let slot = Slot::default();
        slots.insert(key.to_string(), Arc::clone(&slot));
        slot
    }

    /// Completed bundle for `key`, if one has been stored.
    pub fn get(&self, key: &str) -> Option<FontBundle> {
        self.slots.lock().get(key).and_then(|slot| slot.get().cloned())
    }

    /// Whether a completed result exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.slots
            .lock()
            .get(key)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of completed entries. Fetches still in flight are not counted.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Callers awaiting an in-flight fetch still receive its result.
    pub fn clear(&self) {
        let dropped = {
            let mut slots = self.slots.lock();
            std::mem::take(&mut *slots)
        };
        log::debug!("Cleared {} font cache slots", dropped.len());
    }
}
