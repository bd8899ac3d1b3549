//! Pure domain types with minimal dependencies
//!
//! Types here have no rendering or runtime dependencies so every other
//! module can use them without cycles.

pub mod answer;
pub mod geometry;
pub mod slot;

pub use answer::*;
pub use geometry::*;
pub use slot::*;
