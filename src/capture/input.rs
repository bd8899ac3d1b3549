//! Pointer and touch input normalization
//!
//! Host events arrive in viewport coordinates from either a mouse or a touch
//! screen. They are folded into one device-agnostic `StrokeInput` in
//! surface-local coordinates before reaching the stroke state machine.

use crate::domain::{Bounds, Point};

/// Raw input as delivered by the host UI
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    MouseDown(Point),
    MouseMove(Point),
    MouseUp,
    /// Pointer left the surface; ends any stroke in progress
    MouseLeave,
    /// Active touch points, first one drives the stroke
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
}

/// Device-agnostic stroke input in surface-local pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeInput {
    Start(Point),
    Move(Point),
    End,
}

/// Translate a host event for a surface placed at `bounds`
///
/// Touch events without any touch point carry no position and are dropped.
pub fn normalize(event: &PointerEvent, bounds: &Bounds) -> Option<StrokeInput> {
    match event {
        PointerEvent::MouseDown(p) => Some(StrokeInput::Start(bounds.to_local(*p))),
        PointerEvent::MouseMove(p) => Some(StrokeInput::Move(bounds.to_local(*p))),
        PointerEvent::TouchStart(touches) => touches
            .first()
            .map(|p| StrokeInput::Start(bounds.to_local(*p))),
        PointerEvent::TouchMove(touches) => touches
            .first()
            .map(|p| StrokeInput::Move(bounds.to_local(*p))),
        PointerEvent::MouseUp | PointerEvent::MouseLeave | PointerEvent::TouchEnd => {
            Some(StrokeInput::End)
        }
    }
}
