//! Input events delivered to the screen by the platform shell.

use crate::geometry::Point;

/// An input event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Primary pointer pressed (mouse left button / touch down)
    PointerDown { position: Point },
    /// Pointer moved
    PointerMoved { position: Point },
    /// Primary pointer released
    PointerUp { position: Point },
    /// Vertical wheel scroll in pixels, positive advances down the list
    Wheel { delta_y: f32 },
}

impl Event {
    /// The pointer position carried by this event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            Event::PointerDown { position }
            | Event::PointerMoved { position }
            | Event::PointerUp { position } => Some(*position),
            Event::Wheel { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}
