use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

bitflags! {
    /// Buttons held during a motion event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Buttons: u8 {
        /// Primary button held.
        const LEFT   = 0b001;
        /// Secondary button held.
        const RIGHT  = 0b010;
        /// Middle button held.
        const MIDDLE = 0b100;
    }
}

impl From<Button> for Buttons {
    fn from(b: Button) -> Self {
        match b {
            Button::Left => Self::LEFT,
            Button::Right => Self::RIGHT,
            Button::Middle => Self::MIDDLE,
        }
    }
}
