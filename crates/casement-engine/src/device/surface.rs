use std::sync::Arc;

use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::Color;

use super::SurfaceErrorAction;

/// Presentable render target bound to a window.
///
/// Destroying the surface is dropping it.
pub trait Surface {
    /// Per-step drawing handle produced by [`Surface::bind`].
    type Frame;

    /// Current size in physical pixels.
    fn size(&self) -> PhysicalSize<u32>;

    fn color_format(&self) -> wgpu::TextureFormat;

    fn depth_format(&self) -> Option<wgpu::TextureFormat>;

    /// Reallocates the swapchain. `size` is at least 1x1.
    fn resize(&mut self, size: PhysicalSize<u32>);

    /// Makes the surface the current render target, cleared to `clear`.
    ///
    /// `Ok(None)` means this step has nothing to draw into (transient surface
    /// loss); the caller skips drawing and presenting.
    fn bind(&mut self, clear: Color) -> Result<Option<Self::Frame>>;

    /// Presents a frame obtained from [`Surface::bind`].
    fn present(&mut self, frame: Self::Frame);
}

/// Creation parameters for a surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceDesc {
    pub size: PhysicalSize<u32>,

    /// Requested color format; `None` lets the backend pick from the adapter's list.
    pub color_format: Option<wgpu::TextureFormat>,

    /// Depth target format; `None` creates no depth target.
    pub depth_format: Option<wgpu::TextureFormat>,
}

/// Factory for surfaces bound to a native window.
pub trait SurfaceBackend {
    type Surface: Surface;

    fn create(&mut self, window: Arc<Window>, desc: SurfaceDesc) -> Result<Self::Surface>;
}

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::TextureFormat>,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    if let Some(f) = requested.filter(|f| caps.formats.contains(f)) {
        return Some(f);
    }

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in preferred {
            if caps.formats.contains(&f) {
                return Some(f);
            }
        }
    }

    Some(caps.formats[0])
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn map_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
