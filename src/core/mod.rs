//! Core activity module
//!
//! This module contains:
//! - The Activity driver dispatching messages to the session and surfaces

pub mod activity;

pub use activity::{Activity, Effect};
