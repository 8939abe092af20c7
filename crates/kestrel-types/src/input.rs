//! Platform-agnostic pointer input events.
//!
//! Hosts map their native mouse/touch input to these variants and feed them
//! to the desktop in delivery order. Nothing here reorders or debounces.

use crate::geometry::Point;

/// A platform-agnostic pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Cursor moved to absolute position.
    CursorMove { x: i32, y: i32 },
    /// Pointer pressed at absolute position (mouse or touch).
    PointerClick { x: i32, y: i32 },
    /// Pointer released at absolute position.
    PointerRelease { x: i32, y: i32 },
}

impl InputEvent {
    /// Absolute pointer position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            InputEvent::CursorMove { x, y }
            | InputEvent::PointerClick { x, y }
            | InputEvent::PointerRelease { x, y } => Point::new(x, y),
        }
    }
}
