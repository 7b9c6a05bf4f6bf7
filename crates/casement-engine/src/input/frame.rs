use std::collections::HashSet;

use super::types::{InputEvent, InputKey};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys/buttons, soft keyboard).
/// `InputFrame` provides events and transition sets for the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Injected events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys and buttons pressed this frame.
    pub pressed: HashSet<InputKey>,

    /// Keys and buttons released this frame.
    pub released: HashSet<InputKey>,

    /// Character codes injected this frame, in order.
    pub text: Vec<u32>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.pressed.clear();
        self.released.clear();
        self.text.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Text stream decoded as UTF-32, skipping codes that are not scalar values.
    pub fn text_string(&self) -> String {
        self.text.iter().filter_map(|&c| char::from_u32(c)).collect()
    }
}
