//! Shared constants for ink rendering and raster sizing

/// Ink stroke constants
pub mod ink {
    /// Stroke width in pixels
    pub const WIDTH: f32 = 6.0;
}

/// Resize handling constants
pub mod resize {
    /// Size deltas up to this many pixels are treated as layout jitter
    pub const NOISE_THRESHOLD: u32 = 10;
}

/// Surface sizing constants
pub mod surface {
    use std::num::NonZeroU32;

    use crate::domain::RasterSize;

    /// Raster width used before the host reports a real size
    pub const DEFAULT_WIDTH: u32 = 320;
    /// Raster height used before the host reports a real size
    pub const DEFAULT_HEIGHT: u32 = 256;

    const WIDTH: NonZeroU32 = match NonZeroU32::new(DEFAULT_WIDTH) {
        Some(w) => w,
        None => NonZeroU32::MIN,
    };
    const HEIGHT: NonZeroU32 = match NonZeroU32::new(DEFAULT_HEIGHT) {
        Some(h) => h,
        None => NonZeroU32::MIN,
    };

    pub fn default_size() -> RasterSize {
        RasterSize {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

/// Scale factors mapping a raster of `from` size onto `to` size
#[inline]
pub fn stretch_factors(from: (u32, u32), to: (u32, u32)) -> (f32, f32) {
    let sx = to.0 as f32 / from.0.max(1) as f32;
    let sy = to.1 as f32 / from.1.max(1) as f32;
    (sx, sy)
}
