/// Keyboard events.
pub mod key;
/// Mouse events.
pub mod mouse;

use serde::{Deserialize, Serialize};

use self::{key::Key, mouse::Button, mouse::Buttons};

/// Raw input delivered by the host. Mouse coordinates are device coordinates;
/// the window manager rescales them into its internal coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key went down or up.
    Key {
        /// The key.
        key: Key,
        /// True on key-down.
        pressed: bool,
    },
    /// A mouse button went down or up.
    MouseButton {
        /// The button.
        button: Button,
        /// True on press.
        pressed: bool,
        /// Device x.
        x: f32,
        /// Device y.
        y: f32,
    },
    /// The pointer moved.
    MouseMotion {
        /// Buttons held during the motion.
        buttons: Buttons,
        /// Device x.
        x: f32,
        /// Device y.
        y: f32,
    },
}

impl InputEvent {
    /// Key-down event.
    pub fn key_down(key: impl Into<Key>) -> Self {
        Self::Key {
            key: key.into(),
            pressed: true,
        }
    }

    /// Key-up event.
    pub fn key_up(key: impl Into<Key>) -> Self {
        Self::Key {
            key: key.into(),
            pressed: false,
        }
    }

    /// Button press.
    pub fn press(button: Button, x: f32, y: f32) -> Self {
        Self::MouseButton {
            button,
            pressed: true,
            x,
            y,
        }
    }

    /// Button release.
    pub fn release(button: Button, x: f32, y: f32) -> Self {
        Self::MouseButton {
            button,
            pressed: false,
            x,
            y,
        }
    }

    /// Pointer motion with no buttons held.
    pub fn motion(x: f32, y: f32) -> Self {
        Self::MouseMotion {
            buttons: Buttons::empty(),
            x,
            y,
        }
    }
}
