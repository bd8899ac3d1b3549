//! Geometric types for surface placement and raster coordinates

use std::num::NonZeroU32;

/// A point in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen placement of a surface in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Create bounds from an origin and a displayed size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Translate a viewport point into surface-local pixel coordinates
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.x, client.y - self.y)
    }

    /// Raster dimensions matching the displayed size, or None when collapsed
    pub fn raster_size(&self) -> Option<RasterSize> {
        RasterSize::new(
            self.width.max(0.0).round() as u32,
            self.height.max(0.0).round() as u32,
        )
    }
}

/// Non-zero pixel dimensions of a raster
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterSize {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl RasterSize {
    /// Create dimensions, rejecting zero on either axis
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    /// Get the width as u32
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Get the height as u32
    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// Whether `other` differs from `self` by more than `threshold` pixels on either axis
    pub fn differs_beyond(&self, other: RasterSize, threshold: u32) -> bool {
        self.width().abs_diff(other.width()) > threshold
            || self.height().abs_diff(other.height()) > threshold
    }
}
