//! Per-context slot collections
//!
//! All mutations are functional updates of the session aggregate. Insertion is
//! positional and never sorted; a layout's order is its display order.

use crate::capture::Snapshot;
use crate::domain::{ContextKey, FREE_CAPTURE_DESCRIPTION, Slot, SlotId, clamp_label};
use crate::session::SessionStore;
use crate::session::ids::SlotOrigin;

/// Slot operations over a borrowed session store
pub struct SlotCollection<'a> {
    store: &'a mut SessionStore,
}

impl<'a> SlotCollection<'a> {
    pub fn new(store: &'a mut SessionStore) -> Self {
        Self { store }
    }

    /// Install `defaults` as the layout of `context` unless one exists
    ///
    /// Returns true if the layout was installed by this call.
    pub fn ensure_layout(&mut self, context: &ContextKey, defaults: &[Slot]) -> bool {
        if self.store.state().layout(context).is_some() {
            return false;
        }
        log::debug!("Installing {} default slots for {}", defaults.len(), context);
        let layout = defaults.to_vec();
        let context = context.clone();
        self.store.update(|mut prev| {
            prev.layouts.insert(context, layout);
            prev
        });
        true
    }

    /// Current layout of `context`, empty if never installed
    pub fn slots(&self, context: &ContextKey) -> &[Slot] {
        self.store
            .state()
            .layout(context)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Insert a copy of `template` right after `index`
    ///
    /// The copy gets a fresh id, is custom, and has no capture. Repeated calls
    /// with the same index put the newest copy first, ahead of earlier ones.
    pub fn duplicate(
        &mut self,
        context: &ContextKey,
        index: usize,
        template: &Slot,
    ) -> Option<SlotId> {
        let Some(len) = self.store.state().layout(context).map(Vec::len) else {
            log::warn!("Cannot duplicate into {}: layout not installed", context);
            return None;
        };
        let id = self.store.next_slot_id(context, SlotOrigin::Copy);
        let slot = Slot::custom(id.clone(), &template.label, &template.description);
        let at = (index + 1).min(len);
        log::debug!("Duplicating {} into {} at {}", template.id, id, at);

        self.store.update(|mut prev| {
            if let Some(layout) = prev.layouts.get_mut(context) {
                layout.insert(at, slot);
            }
            prev
        });
        Some(id)
    }

    /// Append a blank free-capture slot
    pub fn append_blank(&mut self, context: &ContextKey) -> Option<SlotId> {
        if self.store.state().layout(context).is_none() {
            log::warn!("Cannot append to {}: layout not installed", context);
            return None;
        }
        let id = self.store.next_slot_id(context, SlotOrigin::Free);
        let slot = Slot::custom(id.clone(), "", FREE_CAPTURE_DESCRIPTION);

        self.store.update(|mut prev| {
            if let Some(layout) = prev.layouts.get_mut(context) {
                layout.push(slot);
            }
            prev
        });
        Some(id)
    }

    /// Remove a slot and its capture together
    ///
    /// Missing ids are left alone. Returns true if removed. Whether a slot may
    /// be deleted at all is decided by the caller (see `handle_slot_msg`).
    pub fn delete(&mut self, context: &ContextKey, id: &SlotId) -> bool {
        if !self.slots(context).iter().any(|slot| &slot.id == id) {
            return false;
        }

        log::debug!("Deleting slot {} of {}", id, context);
        self.store.update(|mut prev| {
            if let Some(layout) = prev.layouts.get_mut(context) {
                layout.retain(|slot| &slot.id != id);
            }
            prev.captures.remove(id);
            prev
        });
        true
    }

    /// Relabel a slot, keeping at most one character
    pub fn rename(&mut self, context: &ContextKey, id: &SlotId, label: &str) -> bool {
        if !self.slots(context).iter().any(|slot| &slot.id == id) {
            return false;
        }
        let label = clamp_label(label);
        self.store.update(|mut prev| {
            if let Some(slot) = prev
                .layouts
                .get_mut(context)
                .and_then(|layout| layout.iter_mut().find(|slot| &slot.id == id))
            {
                slot.label = label;
            }
            prev
        });
        true
    }

    /// Store the latest capture of a slot; None records a reset
    ///
    /// Captures for slots that are in no layout are dropped so deleted slots
    /// cannot come back as orphans.
    pub fn record_capture(&mut self, id: &SlotId, snapshot: Option<Snapshot>) {
        if self.store.state().slot(id).is_none() {
            log::warn!("Dropping capture for unknown slot {}", id);
            return;
        }
        log::debug!(
            "Recording {} capture for {}",
            if snapshot.is_some() { "new" } else { "empty" },
            id
        );
        let id = id.clone();
        self.store.update(|mut prev| {
            prev.captures.insert(id, snapshot);
            prev
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use std::collections::HashSet;

    fn defaults() -> Vec<Slot> {
        vec![
            Slot::default_slot("口", "口", "嘴巴/入口"),
            Slot::default_slot("火", "火", "热能/灯光"),
            Slot::default_slot("扌", "扌", "动作/抓取"),
        ]
    }

    fn store_with(context: &str) -> SessionStore {
        let mut store = SessionStore::new();
        SlotCollection::new(&mut store).ensure_layout(&context.into(), &defaults());
        store
    }

    fn snapshot() -> Snapshot {
        Snapshot::from_png_bytes(vec![0x89, b'P', b'N', b'G'])
    }

    fn ids(store: &mut SessionStore, context: &str) -> Vec<String> {
        SlotCollection::new(store)
            .slots(&context.into())
            .iter()
            .map(|slot| slot.id.to_string())
            .collect()
    }

    #[test]
    fn test_ensure_layout_keeps_first_defaults() {
        let mut store = SessionStore::new();
        let context = ContextKey::new("C");
        let mut slots = SlotCollection::new(&mut store);

        assert!(slots.ensure_layout(&context, &defaults()));
        assert!(!slots.ensure_layout(&context, &[Slot::default_slot("木", "木", "结构/楼梯")]));
        assert_eq!(slots.slots(&context), defaults().as_slice());
    }

    #[test]
    fn test_mutations_are_not_reverted_by_ensure_layout() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        let mut slots = SlotCollection::new(&mut store);
        slots.append_blank(&context);
        slots.ensure_layout(&context, &defaults());
        assert_eq!(slots.slots(&context).len(), 4);
    }

    #[test]
    fn test_duplicate_inserts_after_index() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        let mut slots = SlotCollection::new(&mut store);
        let before = slots.slots(&context).to_vec();

        let template = before[1].clone();
        let id = slots.duplicate(&context, 1, &template).unwrap();
        let after = slots.slots(&context).to_vec();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[..=1], before[..=1]);
        assert_eq!(after[2].id, id);
        assert_ne!(after[2].id, template.id);
        assert_eq!(after[2].label, template.label);
        assert_eq!(after[2].description, template.description);
        assert!(after[2].is_custom);
        assert_eq!(after[3..], before[2..]);
        assert!(store.state().capture(&id).is_none());
    }

    #[test]
    fn test_duplicate_twice_from_same_index() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        let mut slots = SlotCollection::new(&mut store);
        let template = slots.slots(&context)[0].clone();

        let first = slots.duplicate(&context, 0, &template).unwrap();
        let second = slots.duplicate(&context, 0, &template).unwrap();
        assert_ne!(first, second);

        let order: Vec<&SlotId> = slots.slots(&context).iter().map(|s| &s.id).collect();
        assert_eq!(order[0].as_str(), "口");
        assert_eq!(order[1], &second);
        assert_eq!(order[2], &first);
        assert_eq!(order[3].as_str(), "火");
    }

    #[test]
    fn test_duplicate_index_past_end_appends() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        let mut slots = SlotCollection::new(&mut store);
        let template = slots.slots(&context)[2].clone();
        let id = slots.duplicate(&context, 10, &template).unwrap();
        assert_eq!(slots.slots(&context).last().map(|s| &s.id), Some(&id));
    }

    #[test]
    fn test_operations_without_layout_are_noops() {
        let mut store = SessionStore::new();
        let context = ContextKey::new("nowhere");
        let template = defaults()[0].clone();
        let mut slots = SlotCollection::new(&mut store);

        assert!(slots.duplicate(&context, 0, &template).is_none());
        assert!(slots.append_blank(&context).is_none());
        assert!(!slots.delete(&context, &template.id));
        assert!(!slots.rename(&context, &template.id, "x"));
        assert_eq!(store.state(), &SessionState::default());
    }

    #[test]
    fn test_append_blank() {
        let mut store = store_with("page4");
        let context = ContextKey::new("page4");
        let mut slots = SlotCollection::new(&mut store);
        let id = slots.append_blank(&context).unwrap();

        let last = slots.slots(&context).last().unwrap().clone();
        assert_eq!(last.id, id);
        assert_eq!(last.label, "");
        assert_eq!(last.description, FREE_CAPTURE_DESCRIPTION);
        assert!(last.is_custom);
        assert!(id.as_str().starts_with("page4_free_"));
    }

    #[test]
    fn test_ids_stay_unique_across_mixed_operations() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        let other = ContextKey::new("D");
        let mut slots = SlotCollection::new(&mut store);
        slots.ensure_layout(&other, &[Slot::default_slot("D1", "木", "结构/楼梯")]);

        for round in 0..20 {
            let layout = slots.slots(&context).to_vec();
            let index = round % layout.len();
            slots.duplicate(&context, index, &layout[index]);
            slots.append_blank(&other);
            if round % 3 == 0 {
                let custom = slots
                    .slots(&context)
                    .iter()
                    .find(|slot| slot.is_custom)
                    .map(|slot| slot.id.clone());
                if let Some(id) = custom {
                    assert!(slots.delete(&context, &id));
                }
            }
        }

        let all: Vec<String> = ids(&mut store, "C")
            .into_iter()
            .chain(ids(&mut store, "D"))
            .collect();
        let unique: HashSet<&String> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_delete_removes_slot_and_capture() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        let mut slots = SlotCollection::new(&mut store);
        let id = slots.append_blank(&context).unwrap();
        slots.record_capture(&id, Some(snapshot()));

        assert!(slots.delete(&context, &id));
        assert!(slots.slots(&context).iter().all(|slot| slot.id != id));
        assert!(store.state().capture(&id).is_none());
        assert!(!store.state().captures.contains_key(&id));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        let mut slots = SlotCollection::new(&mut store);

        assert!(!slots.delete(&context, &"missing".into()));
        assert!(!slots.delete(&"D".into(), &"口".into()));
        assert_eq!(slots.slots(&context), defaults().as_slice());
    }

    #[test]
    fn test_rename_clamps_and_keeps_capture() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        let mut slots = SlotCollection::new(&mut store);
        let id = slots.append_blank(&context).unwrap();
        slots.record_capture(&id, Some(snapshot()));

        assert!(slots.rename(&context, &id, "森林"));
        let layout = slots.slots(&context).to_vec();
        assert_eq!(layout[3].label, "森");
        assert_eq!(layout[3].id, id);
        assert!(store.state().capture(&id).is_some());

        let mut slots = SlotCollection::new(&mut store);
        assert!(!slots.rename(&context, &"missing".into(), "x"));
    }

    #[test]
    fn test_reset_capture_updates_count() {
        let mut store = store_with("C");
        let id = SlotId::new("火");
        let mut slots = SlotCollection::new(&mut store);

        slots.record_capture(&id, Some(snapshot()));
        assert_eq!(store.state().collected_count(), 1);

        SlotCollection::new(&mut store).record_capture(&id, None);
        assert_eq!(store.state().collected_count(), 0);

        SlotCollection::new(&mut store).record_capture(&id, Some(snapshot()));
        assert_eq!(store.state().collected_count(), 1);
    }

    #[test]
    fn test_capture_for_unknown_slot_is_dropped() {
        let mut store = store_with("C");
        SlotCollection::new(&mut store).record_capture(&"ghost".into(), Some(snapshot()));
        assert!(!store.state().captures.contains_key(&SlotId::new("ghost")));
    }

    #[test]
    fn test_end_to_end_counts() {
        let mut store = store_with("C");
        let context = ContextKey::new("C");
        assert_eq!(store.state().collected_count(), 0);

        let second = SlotId::new("火");
        SlotCollection::new(&mut store).record_capture(&second, Some(snapshot()));
        assert_eq!(store.state().collected_count(), 1);

        let mut slots = SlotCollection::new(&mut store);
        let template = slots.slots(&context)[1].clone();
        let copy = slots.duplicate(&context, 1, &template).unwrap();
        assert_eq!(slots.slots(&context).len(), 4);
        assert_eq!(store.state().collected_count(), 1);

        let mut slots = SlotCollection::new(&mut store);
        assert!(slots.delete(&context, &second));
        assert_eq!(slots.slots(&context).len(), 3);
        assert_eq!(store.state().collected_count(), 0);
        assert!(store.state().capture(&second).is_none());
        assert!(store.state().capture(&copy).is_none());
        assert!(store.state().slot(&copy).is_some());
    }
}
