//! Session-unique slot ids
//!
//! Ids are `{context}_{origin}_{stamp}` where the stamp is a millisecond
//! timestamp forced to increase strictly, so two slots created within the
//! same millisecond still get distinct ids.

use crate::domain::{ContextKey, SlotId};

/// How a custom slot came to exist
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotOrigin {
    Copy,
    Free,
}

impl SlotOrigin {
    fn as_str(self) -> &'static str {
        match self {
            SlotOrigin::Copy => "copy",
            SlotOrigin::Free => "free",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SlotIdSource {
    last_stamp: i64,
}

impl SlotIdSource {
    /// Next id for `context` that `is_taken` does not reject
    pub fn next(
        &mut self,
        context: &ContextKey,
        origin: SlotOrigin,
        is_taken: impl Fn(&SlotId) -> bool,
    ) -> SlotId {
        loop {
            let stamp = self.next_stamp();
            let id = SlotId::new(format!("{}_{}_{}", context, origin.as_str(), stamp));
            if !is_taken(&id) {
                return id;
            }
            log::debug!("Slot id {} already in use, advancing", id);
        }
    }

    fn next_stamp(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_stamp = now.max(self.last_stamp + 1);
        self.last_stamp
    }
}
