//! Presentation surfaces.
//!
//! The window layer talks to surfaces through the [`Surface`] and
//! [`SurfaceBackend`] traits. The wgpu implementation lives in `gpu`:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) plus an optional depth target
//! - binding frames with a clear and presenting them

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::{WgpuBackend, WgpuSurface};
pub use init::GpuInit;
pub use surface::{Surface, SurfaceBackend, SurfaceDesc};
