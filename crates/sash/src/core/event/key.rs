use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Mods: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Alt / option.
        const ALT   = 0b0100;
        /// Super / command.
        const META  = 0b1000;
    }
}

/// A key code, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Enter / return.
    Enter,
    /// Escape.
    Esc,
    /// Tab.
    Tab,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// A bare modifier key press.
    Modifier(Mods),
}

/// A key event: code plus held modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Held modifiers.
    pub mods: Mods,
    /// The key code.
    pub code: KeyCode,
}

impl Key {
    /// Construct a key from modifiers and code.
    pub fn new(mods: Mods, code: KeyCode) -> Self {
        Self { mods, code }
    }

    /// Is this exactly the given code with no modifiers held?
    pub fn is(&self, code: KeyCode) -> bool {
        self.mods.is_empty() && self.code == code
    }

    /// The character this key would insert, if any. Control and meta chords
    /// never insert text.
    pub fn text(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self.mods.intersects(Mods::CTRL | Mods::META) && !c.is_control() =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self {
            mods: Mods::empty(),
            code,
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        KeyCode::Char(c).into()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Mods::CTRL, "ctrl"),
            (Mods::ALT, "alt"),
            (Mods::META, "meta"),
            (Mods::SHIFT, "shift"),
        ] {
            if self.mods.contains(flag) {
                write!(f, "{name}-")?;
            }
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Modifier(m) => write!(f, "mod({:#06b})", m.bits()),
            other => write!(f, "{}", format!("{other:?}").to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text() {
        assert_eq!(Key::from('a').text(), Some('a'));
        assert_eq!(Key::new(Mods::SHIFT, KeyCode::Char('A')).text(), Some('A'));
        assert_eq!(Key::new(Mods::CTRL, KeyCode::Char('a')).text(), None);
        assert_eq!(Key::from(KeyCode::Tab).text(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Key::new(Mods::CTRL, KeyCode::Char('c')).to_string(), "ctrl-c");
        assert_eq!(Key::from(KeyCode::Backspace).to_string(), "backspace");
        assert!(Key::from(KeyCode::Tab).is(KeyCode::Tab));
        assert!(!Key::new(Mods::SHIFT, KeyCode::Tab).is(KeyCode::Tab));
    }
}
