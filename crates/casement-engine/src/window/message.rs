use crate::input::{Key, MouseButton};

/// How a window reached its new size.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SizeMode {
    Restored,
    Minimized,
    Maximized,
}

/// System menu commands the window cares about.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SysCommand {
    /// Restore from maximized or minimized. The new size arrives afterwards.
    Restore,
    /// Alt-activated window menu.
    KeyMenu,
    Other,
}

/// Platform-neutral window message.
///
/// One value per message pulled off the native queue; the window adapter
/// produces these and the translator consumes them in queue order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NativeMessage {
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),

    KeyDown(Key),
    KeyUp(Key),

    /// Key events while a menu modifier (Alt, F10) is active.
    SysKeyDown(Key),
    SysKeyUp(Key),

    /// Raw character code from text composition.
    Char(u32),

    /// Wheel delta, 120 units per notch.
    MouseWheel(f32),

    Close,
    SetFocus,
    KillFocus,

    SysCommand(SysCommand),

    /// Client area size changed.
    Size { width: u32, height: u32, mode: SizeMode },

    /// An interactive move/resize drag finished.
    ExitSizeMove,

    /// Anything else; forwarded to default handling.
    Other,
}
