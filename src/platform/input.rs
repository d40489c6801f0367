//! Input events delivered to the running effect

use glam::Vec2;

/// Keys the effects react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    ArrowUp,
    ArrowDown,
    /// `r` / `R`
    Reset,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "r" | "R" => Some(Key::Reset),
            _ => None,
        }
    }
}

/// Input in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Press sets the reference point and may trigger a reset
    PointerDown(Vec2),
    /// Move only updates the reference point
    PointerMove(Vec2),
    KeyDown(Key),
}

impl InputEvent {
    /// Pointer position carried by the event
    pub fn pointer(&self) -> Option<Vec2> {
        match self {
            InputEvent::PointerDown(p) | InputEvent::PointerMove(p) => Some(*p),
            InputEvent::KeyDown(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowRight"), Some(Key::ArrowRight));
        assert_eq!(Key::from_name("ArrowDown"), Some(Key::ArrowDown));
        assert_eq!(Key::from_name("r"), Some(Key::Reset));
        assert_eq!(Key::from_name("R"), Some(Key::Reset));
        assert_eq!(Key::from_name(" "), None);
        assert_eq!(Key::from_name("arrowright"), None);
    }

    #[test]
    fn test_pointer_position() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(InputEvent::PointerDown(p).pointer(), Some(p));
        assert_eq!(InputEvent::PointerMove(p).pointer(), Some(p));
        assert_eq!(InputEvent::KeyDown(Key::Reset).pointer(), None);
    }
}
