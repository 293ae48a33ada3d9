//! Input model: pointer events, cursor hints, and the gesture state machine.
//!
//! `PointerEvent` is what the host feeds in on every down/move/up.
//! `InteractionState` is the single in-flight gesture, carrying the context
//! captured at pointer-down that the commit on pointer-up needs.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::RectId;
use crate::geom::{Anchor, Point};

/// One pointer sample from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Pointer position in viewport space.
    pub position: Point,
    /// The pointer is over the drawing surface.
    #[serde(default = "default_true")]
    pub over_canvas: bool,
    /// The pointer is over the displayed image.
    #[serde(default = "default_true")]
    pub over_image: bool,
}

fn default_true() -> bool {
    true
}

impl PointerEvent {
    /// A sample over both the canvas and the image.
    #[must_use]
    pub fn on_image(position: Point) -> Self {
        Self { position, over_canvas: true, over_image: true }
    }

    /// A sample over the canvas but off the image (the letterbox area).
    #[must_use]
    pub fn off_image(position: Point) -> Self {
        Self { position, over_canvas: true, over_image: false }
    }

    /// A sample outside the canvas entirely.
    #[must_use]
    pub fn outside(position: Point) -> Self {
        Self { position, over_canvas: false, over_image: false }
    }
}

/// The gesture in progress between pointer-down and pointer-up.
///
/// `rect_id` is the commit target captured at pointer-down. It is always the
/// rect that was made active when the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging out a new rect.
    Creating {
        /// Snapped viewport position of the pointer-down.
        start: Point,
    },
    /// Dragging an existing rect by its interior.
    Moving {
        rect_id: RectId,
        /// Snapped viewport position of the pointer-down.
        start: Point,
    },
    /// Dragging one of the seven resize anchors.
    Resizing {
        rect_id: RectId,
        /// Anchor position relative to the image origin, at viewport scale.
        anchor: Anchor,
    },
    /// Dragging the top-center rotation anchor.
    Rotating {
        rect_id: RectId,
        /// Anchor position relative to the image origin, at viewport scale.
        anchor: Anchor,
        /// Viewport-space point the rotation angle is measured around.
        pivot: Point,
    },
}

impl InteractionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_creating(&self) -> bool {
        matches!(self, Self::Creating { .. })
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    /// The rect an edit gesture will commit to. `None` while idle or creating.
    #[must_use]
    pub fn target(&self) -> Option<RectId> {
        match self {
            Self::Idle | Self::Creating { .. } => None,
            Self::Moving { rect_id, .. } | Self::Resizing { rect_id, .. } | Self::Rotating { rect_id, .. } => {
                Some(*rect_id)
            }
        }
    }

    /// Short name for log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Creating { .. } => "creating",
            Self::Moving { .. } => "moving",
            Self::Resizing { .. } => "resizing",
            Self::Rotating { .. } => "rotating",
        }
    }
}

/// Cursor shape the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    #[default]
    Default,
    Move,
    /// The pointer is over the canvas but a click there would do nothing.
    CancelOverlay,
}

/// Cursor to show plus whether the native pointer should be hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorHint {
    pub style: CursorStyle,
    pub hide_native: bool,
}

impl CursorHint {
    #[must_use]
    pub fn new(style: CursorStyle, hide_native: bool) -> Self {
        Self { style, hide_native }
    }
}

/// Why a drag-create was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateRejection {
    /// Pointer-up landed on the pointer-down position.
    ZeroSize,
    /// The new rect would overlap an existing one.
    Overlap,
}
