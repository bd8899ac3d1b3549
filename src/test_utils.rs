//! Shared helpers for unit tests

use crate::capture::input::StrokeInput;
use crate::capture::snapshot::Snapshot;
use crate::capture::surface::{CaptureEvent, CaptureSurface};
use crate::domain::{Point, RasterSize};
use crate::render::geometry::resize;
use crate::render::ink::InkStyle;

/// Route `log` output through the test harness; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Empty surface with the default ink style
pub fn surface(width: u32, height: u32) -> CaptureSurface {
    init_logging();
    CaptureSurface::mount(
        RasterSize::new(width, height).unwrap(),
        InkStyle::default(),
        resize::NOISE_THRESHOLD,
        None,
    )
    .unwrap()
}

/// Draw one complete stroke through `points` and return what the owner receives
pub fn stroke(surface: &mut CaptureSurface, points: &[(f32, f32)]) -> Option<CaptureEvent> {
    let (first, rest) = points.split_first()?;
    surface.handle_input(StrokeInput::Start(Point::new(first.0, first.1)));
    for &(x, y) in rest {
        surface.handle_input(StrokeInput::Move(Point::new(x, y)));
    }
    surface.handle_input(StrokeInput::End)
}

/// Snapshot holding one horizontal stroke across a `width` x `height` raster
pub fn drawn_snapshot(width: u32, height: u32) -> Snapshot {
    let mut s = surface(width, height);
    let y = height as f32 / 2.0;
    match stroke(&mut s, &[(4.0, y), (width as f32 - 4.0, y)]) {
        Some(CaptureEvent::Captured(Some(snapshot))) => snapshot,
        other => panic!("expected a capture, got {:?}", other),
    }
}

/// Alpha of the raster pixel at (x, y)
pub fn alpha_at(surface: &CaptureSurface, x: u32, y: u32) -> u8 {
    surface.pixmap().pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
}
