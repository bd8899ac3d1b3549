//! Freehand capture
//!
//! This module contains:
//! - Pointer/touch input normalization (input.rs)
//! - Encoded raster snapshots (snapshot.rs)
//! - Generation-tagged asynchronous restores (restore.rs)
//! - The capture surface state machine (surface.rs)

pub mod input;
pub mod restore;
pub mod snapshot;
pub mod surface;

pub use snapshot::Snapshot;
pub use surface::{CaptureEvent, CaptureSurface, StrokeState};
