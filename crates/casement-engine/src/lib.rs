//! Casement engine crate.
//!
//! Hosts a single native window and its presentation surface, turns window
//! messages into semantic input, and drives the per-frame present loop.

pub mod core;
pub mod device;
pub mod input;
pub mod render;
pub mod time;
pub mod window;

pub mod logging;
