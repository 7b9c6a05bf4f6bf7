use std::fmt;
use std::time::Instant;

/// Keyboard key identifier.
///
/// The window adapter maps platform keycodes into these variants where possible.
/// Keys without a dedicated variant use `Key::Unknown(u32)` carrying the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers as keys
    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

/// Mouse button identifier.
///
/// `Back` and `Forward` are the two "extra" side buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    /// True for the side buttons, which bypass focus gating.
    #[inline]
    pub fn is_extra(self) -> bool {
        matches!(self, MouseButton::Back | MouseButton::Forward)
    }
}

/// Logical identifier for anything that can be pressed and released.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum InputKey {
    Mouse(MouseButton),
    Keyboard(Key),
}

impl From<Key> for InputKey {
    fn from(key: Key) -> Self {
        InputKey::Keyboard(key)
    }
}

impl From<MouseButton> for InputKey {
    fn from(button: MouseButton) -> Self {
        InputKey::Mouse(button)
    }
}

/// Semantic input event, independent of the native message it came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    Press(InputKey),
    Release(InputKey),

    /// Raw character code for the text stream.
    Char(u32),

    /// A physical key was touched; soft keyboards should hide.
    PhysicalKey(Instant),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
