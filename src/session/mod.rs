//! Activity session
//!
//! This module contains:
//! - The session aggregate (state.rs)
//! - The store applying functional updates to it (store.rs)
//! - Session-unique slot id generation (ids.rs)
//! - Message types driving the activity (messages.rs)

pub mod ids;
pub mod messages;
pub mod state;
pub mod store;

pub use state::SessionState;
pub use store::SessionStore;
