//! Ink rendering module
//!
//! This module contains:
//! - Geometry and sizing constants shared by surfaces and config
//! - Raster ink drawing and pixel format conversion using tiny-skia

pub mod geometry;
pub mod ink;
