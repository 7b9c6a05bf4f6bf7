/// How the wgpu backend picks and configures its device and swapchain.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Graphics APIs the instance may use.
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,

    /// Pick an sRGB swapchain format when the caller did not request one.
    pub prefer_srgb: bool,

    /// FIFO is always supported and paces presents to vblank.
    pub present_mode: wgpu::PresentMode,

    /// Falls back to the first supported mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Swapchain depth hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
