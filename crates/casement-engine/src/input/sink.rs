use std::time::Instant;

use super::frame::InputFrame;
use super::state::InputState;
use super::types::{InputEvent, InputKey};

/// Consumer of injected input.
///
/// The window layer only injects; interpreting presses as clicks, drags or
/// gestures belongs to the implementor.
pub trait InputSink {
    fn inject_press(&mut self, key: InputKey);
    fn inject_release(&mut self, key: InputKey);

    /// Appends a raw character code to the text stream.
    fn inject_char(&mut self, code: u32);

    /// Records a physical keyboard interaction at `at`.
    fn physical_key_interaction(&mut self, at: Instant);

    /// Routes a semantic event to the matching injection call.
    fn inject(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Press(key) => self.inject_press(key),
            InputEvent::Release(key) => self.inject_release(key),
            InputEvent::Char(code) => self.inject_char(code),
            InputEvent::PhysicalKey(at) => self.physical_key_interaction(at),
        }
    }
}

/// Default input sink: current state plus the events of the running frame.
///
/// Call [`InputQueue::end_frame`] once the frame's input has been consumed.
#[derive(Debug, Default)]
pub struct InputQueue {
    state: InputState,
    frame: InputFrame,
}

impl InputQueue {
    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn frame(&self) -> &InputFrame {
        &self.frame
    }

    /// Clears per-frame deltas; held keys survive.
    pub fn end_frame(&mut self) {
        self.frame.clear();
    }

    /// Requests an on-screen keyboard. Any physical key interaction hides it again.
    pub fn show_soft_keyboard(&mut self) {
        self.state.soft_keyboard_visible = true;
    }
}

impl InputSink for InputQueue {
    fn inject_press(&mut self, key: InputKey) {
        self.state.apply_event(&mut self.frame, InputEvent::Press(key));
    }

    fn inject_release(&mut self, key: InputKey) {
        self.state.apply_event(&mut self.frame, InputEvent::Release(key));
    }

    fn inject_char(&mut self, code: u32) {
        self.state.apply_event(&mut self.frame, InputEvent::Char(code));
    }

    fn physical_key_interaction(&mut self, at: Instant) {
        self.state.apply_event(&mut self.frame, InputEvent::PhysicalKey(at));
    }
}
