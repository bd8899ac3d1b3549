//! Slot message handlers
//!
//! Handles SlotMsg for all slot collection edits.

use crate::session::SessionStore;
use crate::session::messages::SlotMsg;
use crate::slots::manager::SlotCollection;

/// Handle a SlotMsg, modifying the session store
///
/// Only custom slots may be deleted from here; default slots stay put. The
/// caller is responsible for keeping surfaces in step with the layout.
pub fn handle_slot_msg(store: &mut SessionStore, msg: SlotMsg) {
    let mut slots = SlotCollection::new(store);
    match msg {
        SlotMsg::Duplicate { context, index } => {
            let Some(template) = slots.slots(&context).get(index).cloned() else {
                log::warn!("No slot at {} in {} to duplicate", index, context);
                return;
            };
            slots.duplicate(&context, index, &template);
        }
        SlotMsg::AppendBlank { context } => {
            slots.append_blank(&context);
        }
        SlotMsg::Delete { context, slot } => {
            let is_default = slots
                .slots(&context)
                .iter()
                .any(|s| s.id == slot && !s.is_custom);
            if is_default {
                log::warn!("Refusing to delete default slot {} of {}", slot, context);
                return;
            }
            slots.delete(&context, &slot);
        }
        SlotMsg::Rename {
            context,
            slot,
            label,
        } => {
            slots.rename(&context, &slot, &label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContextKey, Slot};

    fn store() -> SessionStore {
        let mut store = SessionStore::new();
        SlotCollection::new(&mut store).ensure_layout(
            &"page5".into(),
            &[
                Slot::default_slot("亻", "亻", "人类/英雄"),
                Slot::default_slot("讠", "讠", "语言/信号"),
            ],
        );
        store
    }

    fn labels(store: &SessionStore) -> Vec<String> {
        store
            .state()
            .layout(&ContextKey::new("page5"))
            .unwrap()
            .iter()
            .map(|slot| slot.label.clone())
            .collect()
    }

    #[test]
    fn test_duplicate_uses_slot_at_index() {
        let mut store = store();
        handle_slot_msg(
            &mut store,
            SlotMsg::Duplicate {
                context: "page5".into(),
                index: 0,
            },
        );
        assert_eq!(labels(&store), vec!["亻", "亻", "讠"]);
    }

    #[test]
    fn test_duplicate_out_of_range_is_ignored() {
        let mut store = store();
        handle_slot_msg(
            &mut store,
            SlotMsg::Duplicate {
                context: "page5".into(),
                index: 5,
            },
        );
        assert_eq!(labels(&store), vec!["亻", "讠"]);
    }

    #[test]
    fn test_append_rename_delete() {
        let mut store = store();
        handle_slot_msg(
            &mut store,
            SlotMsg::AppendBlank {
                context: "page5".into(),
            },
        );
        let id = store.state().layout(&"page5".into()).unwrap()[2].id.clone();

        handle_slot_msg(
            &mut store,
            SlotMsg::Rename {
                context: "page5".into(),
                slot: id.clone(),
                label: "门".into(),
            },
        );
        assert_eq!(labels(&store), vec!["亻", "讠", "门"]);

        handle_slot_msg(
            &mut store,
            SlotMsg::Delete {
                context: "page5".into(),
                slot: id,
            },
        );
        assert_eq!(labels(&store), vec!["亻", "讠"]);
    }

    #[test]
    fn test_delete_refuses_default_slot() {
        let mut store = store();
        handle_slot_msg(
            &mut store,
            SlotMsg::Delete {
                context: "page5".into(),
                slot: "亻".into(),
            },
        );
        assert_eq!(labels(&store), vec!["亻", "讠"]);
    }
}
