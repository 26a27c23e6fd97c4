//! Pointer and keyboard events delivered to the editor.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
///
/// Shift is the multi-select, axis-lock, angle-snap and fast-nudge modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        modifiers: Modifiers,
    },
}


/// Keys the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    Backspace,
    Escape,
    Shift,
    Other(String),
}

impl Key {
    /// Parse a DOM-style key name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" | "Esc" => Key::Escape,
            "Shift" => Key::Shift,
            other => Key::Other(other.to_string()),
        }
    }

    /// Unit direction of an arrow key (y grows downward).
    pub fn arrow_direction(&self) -> Option<Vec2> {
        match self {
            Key::ArrowUp => Some(Vec2::new(0.0, -1.0)),
            Key::ArrowDown => Some(Vec2::new(0.0, 1.0)),
            Key::ArrowLeft => Some(Vec2::new(-1.0, 0.0)),
            Key::ArrowRight => Some(Vec2::new(1.0, 0.0)),
            _ => None,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// Keyboard event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Focus is in a text input; the editor must not react.
    #[serde(default)]
    pub in_text_field: bool,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            in_text_field: false,
        }
    }
}

/// Start, current position and peak travel of one press-drag-release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTrack {
    pub start: Point,
    pub current: Point,
    max_travel: f64,
}

impl PointerTrack {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
            max_travel: 0.0,
        }
    }

    pub fn update(&mut self, position: Point) {
        self.current = position;
        self.max_travel = self.max_travel.max(self.start.distance(position));
    }

    /// Screen delta from press to current position.
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }

    /// True once the pointer has ever moved at least `threshold` pixels away.
    pub fn travelled(&self, threshold: f64) -> bool {
        self.max_travel >= threshold
    }
}
