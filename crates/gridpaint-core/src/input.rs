//! Pointer and keyboard input types.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            Self::Down { position, .. } | Self::Up { position, .. } | Self::Move { position } => {
                position
            }
        }
    }
}

/// Tracks the pointer position across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position, `None` until the first event.
    pub pointer_position: Option<Point>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an event into the state.
    pub fn apply(&mut self, event: &PointerEvent) {
        self.pointer_position = Some(event.position());
    }

    /// Forget the pointer, e.g. when it leaves the window.
    pub fn pointer_left(&mut self) {
        self.pointer_position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_pointer_position() {
        let mut input = InputState::new();
        assert_eq!(input.pointer_position, None);

        let p = Point::new(1.0, 2.0);
        input.apply(&PointerEvent::Down { position: p, button: MouseButton::Left });
        assert_eq!(input.pointer_position, Some(p));

        let q = Point::new(5.0, 6.0);
        input.apply(&PointerEvent::Up { position: q, button: MouseButton::Left });
        assert_eq!(input.pointer_position, Some(q));

        input.pointer_left();
        assert_eq!(input.pointer_position, None);
    }
}
