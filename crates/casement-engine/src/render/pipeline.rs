use glam::Mat4;

use super::Color;

/// Render collaborator driven once per step by the frame driver.
///
/// `F` is the frame type of the surface being drawn into
/// (see [`Surface::Frame`](crate::device::Surface::Frame)).
pub trait RenderPipeline<F> {
    /// Color the surface is cleared to before drawing.
    fn clear_color(&self) -> Color;

    /// Depth format to allocate with the surface, if any.
    fn preferred_depth_format(&self) -> Option<wgpu::TextureFormat>;

    /// Called whenever the display size changes.
    fn update_projection(&mut self, width: u32, height: u32);

    /// World transform of the camera root; the view matrix is its inverse.
    fn camera_root(&self) -> Mat4;

    fn projection(&self) -> Mat4;

    /// Issues all drawing for this step into `frame`.
    fn draw(&mut self, frame: &mut F, view: &Mat4, projection: &Mat4, view_count: u32);
}
