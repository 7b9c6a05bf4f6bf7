//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window layer injects semantic events into an [`InputSink`]; the
//! `platform` module turns winit events into native window messages.

mod frame;
pub mod platform;
mod sink;
mod state;
mod types;

pub use frame::InputFrame;
pub use sink::{InputQueue, InputSink};
pub use state::InputState;
pub use types::{InputEvent, InputKey, Key, MouseButton};
