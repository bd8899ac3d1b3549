//! Dynamic slot collections
//!
//! This module contains:
//! - SlotCollection, the per-context slot operations (manager.rs)
//! - SlotMsg dispatch (handlers.rs)

pub mod handlers;
pub mod manager;

pub use manager::SlotCollection;
