//! Generation-tagged snapshot restores
//!
//! Resizes and loads decode snapshots asynchronously. Each request carries the
//! generation it was issued under; the surface applies an outcome only if that
//! generation is still the latest, so superseded decodes are discarded.

use image::RgbaImage;

use crate::capture::snapshot::Snapshot;
use crate::domain::RasterSize;

/// Work order for decoding snapshots into a raster of a given size
#[derive(Clone, Debug)]
pub struct RestoreRequest {
    pub generation: u64,
    /// Drawn bottom to top
    pub sources: Vec<Snapshot>,
    pub size: RasterSize,
}

/// Result of running a `RestoreRequest`
#[derive(Clone, Debug)]
pub struct RestoreOutcome {
    pub generation: u64,
    /// None when no source could be decoded
    pub image: Option<RgbaImage>,
}

impl RestoreRequest {
    /// Decode and stack every source, stretched to the target size
    ///
    /// Undecodable sources are logged and skipped.
    pub fn decode(self) -> RestoreOutcome {
        let mut image: Option<RgbaImage> = None;
        for (i, source) in self.sources.iter().enumerate() {
            match source.decode_scaled(self.size) {
                Ok(layer) => match image.as_mut() {
                    Some(base) => image::imageops::overlay(base, &layer, 0, 0),
                    None => image = Some(layer),
                },
                Err(e) => {
                    log::warn!(
                        "Restore generation {}: dropping source {}: {:#}",
                        self.generation,
                        i,
                        e
                    );
                }
            }
        }
        RestoreOutcome {
            generation: self.generation,
            image,
        }
    }

    /// Decode on the blocking pool
    pub async fn run(self) -> RestoreOutcome {
        let generation = self.generation;
        match tokio::task::spawn_blocking(move || self.decode()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Restore generation {} did not complete: {}", generation, e);
                RestoreOutcome {
                    generation,
                    image: None,
                }
            }
        }
    }
}
