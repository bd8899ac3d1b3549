use std::collections::{BTreeMap, HashMap};

use crate::capture::Snapshot;
use crate::domain::{Answer, ContextKey, PageLayout, Slot, SlotId};

/// The whole activity session
///
/// Replaced as one aggregate through `SessionStore::update`; nothing here is
/// mutated from outside the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub agent_name: String,
    /// Fingerprint confirmation on the briefing page
    pub verified: bool,
    /// Installed layouts, keyed by context
    pub layouts: BTreeMap<ContextKey, PageLayout>,
    /// Present entry with None means the slot was reset
    pub captures: HashMap<SlotId, Option<Snapshot>>,
    /// Answers keyed by question
    pub answers: BTreeMap<String, Answer>,
}

impl SessionState {
    /// Number of slots, across all layouts, holding a capture
    pub fn collected_count(&self) -> usize {
        self.layouts
            .values()
            .flatten()
            .filter(|slot| self.capture(&slot.id).is_some())
            .count()
    }

    pub fn capture(&self, id: &SlotId) -> Option<&Snapshot> {
        self.captures.get(id).and_then(Option::as_ref)
    }

    pub fn layout(&self, context: &ContextKey) -> Option<&PageLayout> {
        self.layouts.get(context)
    }

    /// Look up a slot anywhere in the session
    pub fn slot(&self, id: &SlotId) -> Option<(&ContextKey, &Slot)> {
        self.layouts.iter().find_map(|(context, layout)| {
            layout
                .iter()
                .find(|slot| &slot.id == id)
                .map(|slot| (context, slot))
        })
    }

    /// Whether `id` is used by any layout or capture entry
    pub fn contains_slot_id(&self, id: &SlotId) -> bool {
        self.captures.contains_key(id) || self.slot(id).is_some()
    }

    pub fn answer(&self, key: &str) -> Option<&Answer> {
        self.answers.get(key)
    }

    /// Captured slots in context then layout order
    pub fn captured_slots(&self) -> Vec<(&ContextKey, &Slot, &Snapshot)> {
        self.layouts
            .iter()
            .flat_map(|(context, layout)| {
                layout.iter().filter_map(move |slot| {
                    self.capture(&slot.id).map(|snapshot| (context, slot, snapshot))
                })
            })
            .collect()
    }
}
