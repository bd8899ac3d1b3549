//! Freehand capture surface
//!
//! One drawable raster region. Pointer input drives a two-state stroke
//! machine (`Idle` / `Active`); the raster is snapshotted and handed to the
//! owner only when a stroke ends or the surface is reset.
//!
//! Resizes and loads go through `RestoreRequest`s tagged with a generation.
//! Every resize, load, or reset bumps the generation, so an outcome that
//! arrives after a newer request was issued never touches the raster.

use anyhow::{Context, Result};
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::capture::input::{self, PointerEvent, StrokeInput};
use crate::capture::restore::{RestoreOutcome, RestoreRequest};
use crate::capture::snapshot::Snapshot;
use crate::config::PadConfig;
use crate::domain::{Bounds, Point, RasterSize};
use crate::render::geometry;
use crate::render::ink::{self, InkStyle};

/// Stroke state of a surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeState {
    Idle,
    /// A stroke is in progress; `last` is the current end of the path
    Active { last: Point },
}

/// Notification for the owner of a surface
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureEvent {
    /// New raster content, or None after a reset
    Captured(Option<Snapshot>),
}

pub struct CaptureSurface {
    pixmap: Pixmap,
    style: InkStyle,
    resize_threshold: u32,
    state: StrokeState,
    has_ink: bool,
    generation: u64,
    pending: Option<RestoreRequest>,
    /// A stroke finished while a restore was pending; re-report once it lands
    stroke_during_restore: bool,
}

impl std::fmt::Debug for CaptureSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSurface")
            .field("size", &(self.pixmap.width(), self.pixmap.height()))
            .field("state", &self.state)
            .field("has_ink", &self.has_ink)
            .field("generation", &self.generation)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl CaptureSurface {
    /// Create a surface, drawing `initial` before any stroke is accepted
    ///
    /// A snapshot that fails to decode leaves the surface empty.
    pub fn mount(
        size: RasterSize,
        style: InkStyle,
        resize_threshold: u32,
        initial: Option<&Snapshot>,
    ) -> Result<Self> {
        let pixmap = ink::blank_pixmap(size)
            .with_context(|| format!("Cannot allocate {}x{} raster", size.width(), size.height()))?;
        let mut surface = Self {
            pixmap,
            style,
            resize_threshold,
            state: StrokeState::Idle,
            has_ink: false,
            generation: 0,
            pending: None,
            stroke_during_restore: false,
        };

        if let Some(snapshot) = initial {
            match snapshot.decode_scaled(size) {
                Ok(img) => {
                    ink::composite(&mut surface.pixmap, &img);
                    surface.has_ink = true;
                }
                Err(e) => log::warn!("Mounting empty surface, snapshot unreadable: {:#}", e),
            }
        }
        Ok(surface)
    }

    /// Create a surface using the configured ink style and default size
    pub fn with_config(config: &PadConfig, initial: Option<&Snapshot>) -> Result<Self> {
        Self::mount(
            config.surface_size(),
            InkStyle::from(config),
            config.resize_threshold,
            initial,
        )
    }

    pub fn size(&self) -> RasterSize {
        // The raster is only ever allocated from a RasterSize
        RasterSize::new(self.pixmap.width(), self.pixmap.height())
            .unwrap_or_else(geometry::surface::default_size)
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, StrokeState::Active { .. })
    }

    /// Whether anything was drawn or loaded; gates the reset affordance
    pub fn has_ink(&self) -> bool {
        self.has_ink
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending_restore(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed a host event for a surface currently placed at `bounds`
    pub fn handle_pointer(&mut self, event: &PointerEvent, bounds: &Bounds) -> Option<CaptureEvent> {
        let input = input::normalize(event, bounds)?;
        self.handle_input(input)
    }

    /// Advance the stroke state machine
    pub fn handle_input(&mut self, input: StrokeInput) -> Option<CaptureEvent> {
        match (self.state, input) {
            (_, StrokeInput::Start(p)) => {
                self.state = StrokeState::Active { last: p };
                None
            }
            (StrokeState::Active { last }, StrokeInput::Move(p)) => {
                ink::draw_segment(&mut self.pixmap, &self.style, last, p);
                self.state = StrokeState::Active { last: p };
                None
            }
            (StrokeState::Active { .. }, StrokeInput::End) => self.end_stroke(),
            (StrokeState::Idle, StrokeInput::Move(_) | StrokeInput::End) => None,
        }
    }

    fn end_stroke(&mut self) -> Option<CaptureEvent> {
        self.state = StrokeState::Idle;
        self.has_ink = true;
        if self.pending.is_some() {
            self.stroke_during_restore = true;
        }
        match self.snapshot() {
            Ok(snapshot) => Some(CaptureEvent::Captured(Some(snapshot))),
            Err(e) => {
                log::error!("Stroke finished but raster could not be captured: {:#}", e);
                None
            }
        }
    }

    /// Encode the whole raster
    ///
    /// While a restore is pending, its sources are decoded here and the
    /// current raster is drawn over them, so the snapshot never lacks ink that
    /// has not landed yet.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::encode(&self.capture_image())
    }

    fn capture_image(&self) -> RgbaImage {
        let current = ink::to_rgba_image(&self.pixmap);
        let Some(pending) = &self.pending else {
            return current;
        };
        match pending.clone().decode().image {
            Some(mut base) => {
                image::imageops::overlay(&mut base, &current, 0, 0);
                base
            }
            None => current,
        }
    }

    /// Clear all ink and report an absent capture
    ///
    /// In-flight restores are invalidated so they cannot bring ink back.
    pub fn reset(&mut self) -> CaptureEvent {
        ink::clear(&mut self.pixmap);
        self.state = StrokeState::Idle;
        self.has_ink = false;
        self.generation += 1;
        self.pending = None;
        self.stroke_during_restore = false;
        CaptureEvent::Captured(None)
    }

    /// Follow a change of displayed size
    ///
    /// Jitter within the noise threshold is ignored. Otherwise the raster is
    /// snapshotted, reallocated at `size`, and a restore is returned for the
    /// host to run. A restore still pending from an earlier resize is folded
    /// into the new request so its ink is not lost.
    pub fn resize(&mut self, size: RasterSize) -> Option<RestoreRequest> {
        let current = self.size();
        if !current.differs_beyond(size, self.resize_threshold) {
            return None;
        }

        let Some(pixmap) = ink::blank_pixmap(size) else {
            log::warn!(
                "Cannot allocate {}x{} raster, keeping {}x{}",
                size.width(),
                size.height(),
                current.width(),
                current.height()
            );
            return None;
        };
        let mut sources = self
            .pending
            .take()
            .map(|pending| pending.sources)
            .unwrap_or_default();
        if !ink::is_blank(&self.pixmap) {
            match self.snapshot() {
                Ok(snapshot) => sources.push(snapshot),
                Err(e) => log::error!("Dropping ink on resize, capture failed: {:#}", e),
            }
        }

        self.pixmap = pixmap;
        self.generation += 1;

        // Keep the pen where the stretched ink will be
        if let StrokeState::Active { last } = self.state {
            let (sx, sy) = geometry::stretch_factors(
                (current.width(), current.height()),
                (size.width(), size.height()),
            );
            self.state = StrokeState::Active {
                last: Point::new(last.x * sx, last.y * sy),
            };
        }

        if sources.is_empty() {
            log::debug!(
                "Resized empty surface to {}x{}",
                size.width(),
                size.height()
            );
            return None;
        }

        let request = RestoreRequest {
            generation: self.generation,
            sources,
            size,
        };
        log::debug!(
            "Resized surface to {}x{}, restore generation {}",
            size.width(),
            size.height(),
            self.generation
        );
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Replace the raster content with `snapshot` once decoded
    pub fn load(&mut self, snapshot: Snapshot) -> RestoreRequest {
        ink::clear(&mut self.pixmap);
        self.state = StrokeState::Idle;
        self.has_ink = true;
        self.generation += 1;
        self.stroke_during_restore = false;
        let request = RestoreRequest {
            generation: self.generation,
            sources: vec![snapshot],
            size: self.size(),
        };
        self.pending = Some(request.clone());
        request
    }

    /// Apply a finished restore if it is still the latest one
    ///
    /// Returns a fresh capture when a stroke was completed while the restore
    /// was in flight, so the stored capture matches the landed raster.
    pub fn finish_restore(&mut self, outcome: RestoreOutcome) -> Option<CaptureEvent> {
        if self.pending.is_none() || outcome.generation != self.generation {
            log::debug!(
                "Discarding stale restore generation {} (current {})",
                outcome.generation,
                self.generation
            );
            return None;
        }
        self.pending = None;

        match outcome.image {
            Some(img) => {
                ink::composite(&mut self.pixmap, &img);
                self.has_ink = true;
            }
            None => {
                log::warn!(
                    "Restore generation {} produced nothing, keeping current raster",
                    outcome.generation
                );
                self.has_ink = !ink::is_blank(&self.pixmap);
            }
        }

        if std::mem::take(&mut self.stroke_during_restore) {
            return match self.snapshot() {
                Ok(snapshot) => Some(CaptureEvent::Captured(Some(snapshot))),
                Err(e) => {
                    log::error!("Restored raster could not be captured: {:#}", e);
                    None
                }
            };
        }
        None
    }
}
