//! Freehand glyph collection for a guided, multi-page activity
//!
//! A host UI feeds pointer input, size changes, and navigation into
//! [`core::Activity`]. Ink is rendered into per-slot rasters with tiny-skia,
//! completed strokes are stored as PNG snapshots in the session, and slot
//! collections can be edited without losing captured drawings.

pub mod capture;
pub mod config;
pub mod core;
pub mod domain;
pub mod export;
pub mod mission;
pub mod render;
pub mod session;
pub mod slots;

#[cfg(test)]
mod test_utils;
