//! Render collaborator contract.
//!
//! The window layer owns the surface; everything drawn into it comes from a
//! [`RenderPipeline`] implementation supplied by the application.

mod color;
mod pipeline;

pub use color::Color;
pub use pipeline::RenderPipeline;
