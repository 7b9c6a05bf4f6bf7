use std::collections::HashSet;
use std::time::Instant;

use super::frame::InputFrame;
use super::types::{InputEvent, InputKey};

/// Current input state for the window.
///
/// Holds "is down" information and the physical keyboard bookkeeping.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Set of currently held keys and buttons.
    pub down: HashSet<InputKey>,

    /// Time of the most recent physical key press or release.
    pub last_physical_keypress: Option<Instant>,

    /// Whether an on-screen keyboard is currently requested.
    pub soft_keyboard_visible: bool,
}

impl InputState {
    /// Applies an injected event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Press(key) => {
                // Repeats keep the key held but do not count as a new transition.
                if self.down.insert(key) {
                    frame.pressed.insert(key);
                }
            }

            InputEvent::Release(key) => {
                if self.down.remove(&key) {
                    frame.released.insert(key);
                }
            }

            InputEvent::Char(code) => frame.text.push(code),

            InputEvent::PhysicalKey(at) => {
                self.last_physical_keypress = Some(at);
                self.soft_keyboard_visible = false;
            }
        }

        frame.push_event(ev);
    }

    pub fn is_down(&self, key: impl Into<InputKey>) -> bool {
        self.down.contains(&key.into())
    }
}
