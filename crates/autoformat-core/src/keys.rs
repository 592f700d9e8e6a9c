//! Host-agnostic key events.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CONTROL = 0b0010;
        /// Alt / Option.
        const ALT = 0b0100;
        /// Meta / Command / Super.
        const META = 0b1000;
    }
}

/// The physical key that was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Any other printable key.
    Char(char),
}

/// A key press delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event.
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press with no modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Unmodified space bar.
    pub fn space() -> Self {
        Self::plain(KeyCode::Space)
    }

    /// Unmodified Enter.
    pub fn enter() -> Self {
        Self::plain(KeyCode::Enter)
    }

    /// Map a typed character to its key (`' '` is the space bar, `'\n'` is Enter).
    pub fn from_char(ch: char) -> Self {
        let code = match ch {
            ' ' => KeyCode::Space,
            '\n' | '\r' => KeyCode::Enter,
            '\t' => KeyCode::Tab,
            other => KeyCode::Char(other),
        };
        Self::plain(code)
    }

    /// Returns `true` while Shift is held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}
