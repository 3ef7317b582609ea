//! Host-agnostic input events.
//!
//! The host toolkit translates its native pointer, keyboard and wheel events
//! into these types before handing them to a session or an image window.

use serde::{Deserialize, Serialize};

/// Pointer buttons the engines react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

/// Keys with a meaning inside overlay sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// One-pixel pointer nudge for arrow keys.
    pub fn arrow_delta(self) -> Option<(i32, i32)> {
        match self {
            Key::Up => Some((0, -1)),
            Key::Down => Some((0, 1)),
            Key::Left => Some((-1, 0)),
            Key::Right => Some((1, 0)),
            Key::Enter | Key::Escape => None,
        }
    }
}

/// Modifier keys held during a wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// A mouse wheel event.
///
/// `steps` follows the common toolkit convention: positive when the wheel
/// is rolled toward the user (scroll down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WheelInput {
    pub steps: i32,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl WheelInput {
    pub fn new(steps: i32) -> Self {
        Self {
            steps,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(steps: i32, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self {
            steps,
            modifiers: Modifiers { ctrl, shift, alt },
        }
    }
}
