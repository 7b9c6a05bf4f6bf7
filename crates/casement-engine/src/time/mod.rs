//! Time subsystem.
//!
//! Frame timing diagnostics, decoupled from the window layer:
//! - one `FrameClock` per frame loop
//! - `begin()` at step start, `end()` once the frame has been presented

mod frame_clock;

pub use frame_clock::FrameClock;
