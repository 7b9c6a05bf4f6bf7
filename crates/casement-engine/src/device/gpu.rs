use std::sync::Arc;

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::Color;

use super::surface::{self, Surface, SurfaceBackend, SurfaceDesc};
use super::{GpuFrame, GpuInit};

/// Creates wgpu surfaces for windows.
#[derive(Debug, Clone, Default)]
pub struct WgpuBackend {
    init: GpuInit,
}

impl WgpuBackend {
    pub fn new(init: GpuInit) -> Self {
        Self { init }
    }
}

impl SurfaceBackend for WgpuBackend {
    type Surface = WgpuSurface;

    fn create(&mut self, window: Arc<Window>, desc: SurfaceDesc) -> Result<WgpuSurface> {
        // Adapter/device acquisition is asynchronous under wgpu.
        pollster::block_on(WgpuSurface::new(window, desc, self.init.clone()))
    }
}

/// Owns wgpu core objects, the swapchain configuration and the depth target.
pub struct WgpuSurface {
    /// Surface bound to the window. Declared first so it drops before the window.
    surface: wgpu::Surface<'static>,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    depth_format: Option<wgpu::TextureFormat>,
    depth: Option<DepthTarget>,

    window: Arc<Window>,
}

struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl WgpuSurface {
    async fn new(window: Arc<Window>, desc: SurfaceDesc, init: GpuInit) -> Result<Self> {
        let GpuInit {
            backends,
            power_preference,
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        // An `Arc<Window>` target yields a `'static` surface; the window outlives it.
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("casement device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, desc.color_format, prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: desc.size.width.max(1),
            height: desc.size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let depth = desc
            .depth_format
            .map(|f| DepthTarget::new(&device, f, config.width, config.height));

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            config,
            depth_format: desc.depth_format,
            depth,
            window,
        })
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    fn clear_pass(&self, frame: &mut GpuFrame, clear: Color) {
        let depth_stencil_attachment = frame.depth_view.as_ref().map(|view| {
            wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }
        });

        let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("casement clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }
}

impl Surface for WgpuSurface {
    type Frame = GpuFrame;

    fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    fn color_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth_format
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        // wgpu rejects 0x0 configurations.
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);

        if let Some(format) = self.depth_format {
            self.depth = Some(DepthTarget::new(&self.device, format, size.width, size.height));
        }
    }

    fn bind(&mut self, clear: Color) -> Result<Option<GpuFrame>> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                let action = surface::map_surface_error(&err);
                anyhow::ensure!(!action.is_fatal(), "surface is unusable: {err}");

                if action == super::SurfaceErrorAction::Reconfigured {
                    self.surface.configure(&self.device, &self.config);
                }
                log::warn!("skipping frame ({err}): {action:?}");
                return Ok(None);
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("casement frame encoder"),
            });

        let mut frame = GpuFrame {
            surface_texture,
            view,
            depth_view: self.depth.as_ref().map(|d| d.view.clone()),
            encoder,
        };

        self.clear_pass(&mut frame, clear);
        Ok(Some(frame))
    }

    fn present(&mut self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            depth_view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        drop(depth_view);

        self.window.pre_present_notify();
        surface_texture.present();
    }
}

impl DepthTarget {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("casement depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            _texture: texture,
            view,
        }
    }
}
