//! Session store with whole-aggregate updates
//!
//! Every mutation goes through `update`, which hands the previous state to a
//! closure and installs whatever it returns.

use crate::domain::{Answer, ContextKey, SlotId};
use crate::session::ids::{SlotIdSource, SlotOrigin};
use crate::session::state::SessionState;

#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
    ids: SlotIdSource,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Replace the aggregate with `f(previous)`
    pub fn update(&mut self, f: impl FnOnce(SessionState) -> SessionState) {
        let prev = std::mem::take(&mut self.state);
        self.state = f(prev);
    }

    /// Fresh slot id that no layout or capture entry uses yet
    pub fn next_slot_id(&mut self, context: &ContextKey, origin: SlotOrigin) -> SlotId {
        let state = &self.state;
        self.ids
            .next(context, origin, |id| state.contains_slot_id(id))
    }

    pub fn set_agent_name(&mut self, name: &str) {
        let name = name.trim().to_string();
        self.update(|prev| SessionState {
            agent_name: name,
            ..prev
        });
    }

    /// Fingerprint confirmation
    pub fn verify(&mut self) {
        self.update(|prev| SessionState {
            verified: true,
            ..prev
        });
    }

    pub fn set_answer(&mut self, key: &str, answer: Answer) {
        self.update(|mut prev| {
            prev.answers.insert(key.to_string(), answer);
            prev
        });
    }

    /// Flip a flag answer; an absent answer counts as unset
    pub fn toggle_flag(&mut self, key: &str) {
        let set = self.state.answer(key).is_some_and(Answer::is_set);
        self.set_answer(key, Answer::Flag(!set));
    }

    pub fn set_rating(&mut self, key: &str, stars: u8) {
        self.set_answer(key, Answer::rating(stars));
    }

    /// Drop everything collected so far
    ///
    /// The id source is kept so ids stay unique across resets.
    pub fn reset(&mut self) {
        log::info!("Resetting session");
        self.update(|_| SessionState::default());
    }
}
