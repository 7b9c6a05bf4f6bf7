/// A bound frame: acquired swapchain image, cleared, ready for drawing.
///
/// Short-lived; hand it back to [`Surface::present`](super::Surface::present)
/// promptly. Holding the surface texture blocks acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub depth_view: Option<wgpu::TextureView>,
    pub encoder: wgpu::CommandEncoder,
}
