//! Input model: pointer buttons, touch points, and the pan gesture state machine.
//!
//! The cropper only recognizes one gesture: dragging the image. A drag starts
//! on a primary mouse press or a single-finger touch, accumulates
//! frame-to-frame deltas while active, and ends on release. Touch lists with
//! more than one finger are ignored rather than interpreted as pinch zoom.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Which device started the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Internal state for the pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next press or touch.
    #[default]
    Idle,
    /// The user is dragging the image.
    Panning {
        /// Viewport-space position of the previous event, used to compute the delta.
        last_screen: Point,
        /// Device that started the drag; events from the other device are ignored.
        source: PointerSource,
    },
}

impl InputState {
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}

/// Return the single touch point if exactly one finger is down.
#[must_use]
pub fn single_touch(touches: &[Point]) -> Option<Point> {
    match touches {
        [only] => Some(*only),
        _ => None,
    }
}
