//! Mission structure
//!
//! This module contains:
//! - The page and station catalog (catalog.rs)
//! - Gated page navigation (navigator.rs)
//! - Challenge countdowns (countdown.rs)

pub mod catalog;
pub mod countdown;
pub mod navigator;

pub use catalog::Page;
pub use countdown::Countdown;
pub use navigator::MissionNavigator;
