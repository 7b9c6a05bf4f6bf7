//! Frame loop contracts.
//!
//! The [`FrameDriver`] steps a started window host once per frame; the
//! [`RunFlag`] tells the owning loop when to stop calling it.

mod driver;
mod signal;

pub use driver::{FrameDriver, FrameStatus};
pub use signal::RunFlag;
