use super::debounce::ResizePending;

/// Whether the window currently owns input focus.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FocusState {
    #[default]
    Active,
    Background,
}

/// Mutable window bookkeeping shared by the translator and the debouncer.
///
/// Owned by the window host and passed by reference; nothing here is global.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowState {
    pub focus: FocusState,

    /// Accumulated wheel delta. Only the consumer resets it.
    pub scroll: f32,

    pub resize: ResizePending,

    /// Set once a close message has been seen.
    pub quit_requested: bool,
}

impl WindowState {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.focus == FocusState::Active
    }
}
