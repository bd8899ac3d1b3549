//! Portable raster snapshots
//!
//! A snapshot is an encoded PNG (RGBA, 8-bit, straight alpha). It is opaque to
//! the session: only the capture surface and the exporter look inside.

use std::fmt;
use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::RgbaImage;

use crate::domain::RasterSize;

/// Encoded raster content of one slot
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Arc<[u8]>,
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("bytes", &self.png.len())
            .finish()
    }
}

impl Snapshot {
    /// Wrap already-encoded bytes; validity is only checked on decode
    pub fn from_png_bytes(bytes: Vec<u8>) -> Self {
        Self { png: bytes.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Encode an image as a snapshot
    pub fn encode(img: &RgbaImage) -> Result<Self> {
        let mut buffer = Vec::new();
        write_png(&mut buffer, img).context("Failed to encode snapshot")?;
        Ok(Self::from_png_bytes(buffer))
    }

    /// Decode at the size it was captured
    pub fn decode(&self) -> Result<RgbaImage> {
        let img = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)
            .context("Failed to decode snapshot")?;
        Ok(img.to_rgba8())
    }

    /// Decode and stretch to `size`
    pub fn decode_scaled(&self, size: RasterSize) -> Result<RgbaImage> {
        let img = self.decode()?;
        if img.dimensions() == (size.width(), size.height()) {
            return Ok(img);
        }
        Ok(image::imageops::resize(
            &img,
            size.width(),
            size.height(),
            image::imageops::FilterType::Triangle,
        ))
    }
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
