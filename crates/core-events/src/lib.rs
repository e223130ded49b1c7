//! Normalized input event types.
//!
//! The search controller is stepped one discrete event at a time; these types
//! are what it consumes. Raw terminal decoding lives outside this workspace,
//! producers only need to build `InputEvent`s.

use std::fmt;

/// Normalized input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Logical key press.
    Key(KeyEvent),
    /// Synthetic interrupt (Ctrl-C) surfaced distinctly from ordinary chords.
    CtrlC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Unmodified printable character.
    pub fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// `Ctrl` + character chord.
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    /// True for the keys that abort a modal prompt (Esc, Ctrl-C).
    pub fn is_interrupt(&self) -> bool {
        match self.code {
            KeyCode::Esc => true,
            KeyCode::Char(c) => self.mods.contains(KeyModifiers::CTRL) && c == 'c',
            _ => false,
        }
    }

    /// Printable character without Ctrl/Alt modifiers (Shift is part of the char).
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self
                    .mods
                    .intersects(KeyModifiers::CTRL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

/// KeyCode enumerates normalized logical key representations consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(key: KeyEvent) -> Self {
        InputEvent::Key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        let k = KeyEvent::ctrl('x');
        let s = format!("{}", k);
        assert!(s.contains("Char"));
    }

    #[test]
    fn interrupt_keys() {
        assert!(KeyEvent::plain(KeyCode::Esc).is_interrupt());
        assert!(KeyEvent::ctrl('c').is_interrupt());
        assert!(!KeyEvent::char('c').is_interrupt());
        assert!(!KeyEvent::plain(KeyCode::Enter).is_interrupt());
    }

    #[test]
    fn printable_ignores_chords() {
        assert_eq!(KeyEvent::char('a').printable(), Some('a'));
        assert_eq!(
            KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT).printable(),
            Some('A')
        );
        assert_eq!(KeyEvent::ctrl('a').printable(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Tab).printable(), None);
    }
}
