//! Event types shared by every widget task.
//!
//! These are the values carried on the multiplexer's input-event stream.
//! Every live environment sees every event; widgets ignore what they do not
//! care about.

/// Key codes for keyboard input.
///
/// A simplified subset of crossterm's `KeyCode`, covering what the
/// calculator's widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };
}

/// An input event, fanned out to every environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during the keypress.
        modifiers: KeyModifiers,
    },
    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// The terminal window gained focus; widgets repaint themselves.
    FocusGained,
    /// The terminal window lost focus.
    FocusLost,
    /// The input thread hit an error it could not recover from.
    Error(String),
}

impl Event {
    /// Convenience constructor for a bare keypress.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}
