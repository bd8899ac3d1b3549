//! Message types for the activity
//!
//! This module contains:
//! - Msg enum with nested sub-enums for organized message handling
//! - Helper constructors for the common messages

use crate::capture::input::PointerEvent;
use crate::capture::restore::RestoreOutcome;
use crate::domain::{Answer, Bounds, ContextKey, RasterSize, SlotId};
use crate::mission::catalog::Page;

// ============================================================================
// Navigation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NavMsg {
    Next,
    Prev,
    /// Jump straight to a page, bypassing gates (host deep links)
    GoTo(Page),
    /// Back to the cover; collected data is kept
    Restart,
}

// ============================================================================
// Slot collection
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SlotMsg {
    /// Insert a copy of the slot at `index` right after it
    Duplicate { context: ContextKey, index: usize },
    /// Append a blank free-capture slot
    AppendBlank { context: ContextKey },
    Delete { context: ContextKey, slot: SlotId },
    Rename {
        context: ContextKey,
        slot: SlotId,
        label: String,
    },
}

// ============================================================================
// Capture surfaces
// ============================================================================

#[derive(Debug, Clone)]
pub enum SurfaceMsg {
    /// Host input for a surface currently placed at `bounds`
    Pointer { bounds: Bounds, event: PointerEvent },
    /// The displayed size changed
    Resized(RasterSize),
    /// Reset affordance pressed
    Reset,
    /// A restore issued earlier has finished decoding
    RestoreFinished(RestoreOutcome),
}

// ============================================================================
// Agent, answers, challenge
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum AgentMsg {
    SetName(String),
    Verify,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerMsg {
    Set { key: String, answer: Answer },
    ToggleFlag(String),
    Rate { key: String, stars: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeMsg {
    Start,
    /// One second elapsed
    Tick,
}

/// All messages accepted by `Activity::update`
#[derive(Debug, Clone)]
pub enum Msg {
    Nav(NavMsg),
    Slot(SlotMsg),
    Surface { slot: SlotId, msg: SurfaceMsg },
    Agent(AgentMsg),
    Answer(AnswerMsg),
    Challenge(ChallengeMsg),
    /// Drop the whole session and return to the cover
    ResetSession,
}

impl Msg {
    pub fn next() -> Self {
        Msg::Nav(NavMsg::Next)
    }

    pub fn prev() -> Self {
        Msg::Nav(NavMsg::Prev)
    }

    pub fn duplicate(context: impl Into<ContextKey>, index: usize) -> Self {
        Msg::Slot(SlotMsg::Duplicate {
            context: context.into(),
            index,
        })
    }

    pub fn append_blank(context: impl Into<ContextKey>) -> Self {
        Msg::Slot(SlotMsg::AppendBlank {
            context: context.into(),
        })
    }

    pub fn delete(context: impl Into<ContextKey>, slot: impl Into<SlotId>) -> Self {
        Msg::Slot(SlotMsg::Delete {
            context: context.into(),
            slot: slot.into(),
        })
    }

    pub fn rename(
        context: impl Into<ContextKey>,
        slot: impl Into<SlotId>,
        label: impl Into<String>,
    ) -> Self {
        Msg::Slot(SlotMsg::Rename {
            context: context.into(),
            slot: slot.into(),
            label: label.into(),
        })
    }

    pub fn surface(slot: impl Into<SlotId>, msg: SurfaceMsg) -> Self {
        Msg::Surface {
            slot: slot.into(),
            msg,
        }
    }

    pub fn pointer(slot: impl Into<SlotId>, bounds: Bounds, event: PointerEvent) -> Self {
        Self::surface(slot, SurfaceMsg::Pointer { bounds, event })
    }
}
