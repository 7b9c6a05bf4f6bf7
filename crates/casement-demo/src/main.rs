use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};

use casement_engine::core::{FrameDriver, FrameStatus, RunFlag};
use casement_engine::device::{GpuFrame, WgpuBackend};
use casement_engine::input::{InputKey, InputQueue, Key, MouseButton};
use casement_engine::logging::{LoggingConfig, init_logging};
use casement_engine::render::{Color, RenderPipeline};
use casement_engine::window::{ExecutableIconProvider, HostConfig, WindowHost};

const CONFIG_PATH: &str = "casement.toml";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = HostConfig::load(CONFIG_PATH)?;
    let run = RunFlag::new();

    let mut host = WindowHost::new(config, WgpuBackend::default(), run.clone())
        .with_icon_provider(ExecutableIconProvider::new());
    let mut renderer = OrbitRenderer::new();
    let mut input = InputQueue::default();
    let mut driver = FrameDriver::new();

    let handle = host.start(&mut renderer).context("failed to open the demo window")?;
    log::info!("native window handle: {handle:?}");

    while run.is_running() {
        let status = driver.step(&mut host, &mut renderer, &mut input)?;

        for key in &input.frame().pressed {
            match key {
                InputKey::Keyboard(Key::Escape) => run.stop(),
                InputKey::Mouse(MouseButton::Back | MouseButton::Forward) => renderer.reverse(),
                _ => {}
            }
        }
        let typed = input.frame().text_string();
        if !typed.is_empty() {
            log::info!("typed {typed:?}");
        }

        renderer.zoom(host.scroll());
        host.reset_scroll();
        input.end_frame();

        if status != FrameStatus::Presented {
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    log::info!(
        "exiting after {} frames (last {:?})",
        driver.frame_index(),
        driver.last_frame_duration()
    );
    host.stop();
    Ok(())
}

/// Clears to a slowly shifting color and orbits its camera around the origin.
struct OrbitRenderer {
    started: Instant,
    direction: f32,
    distance: f32,
    aspect: f32,
    projection: Mat4,
    last_view_projection: Mat4,
}

impl OrbitRenderer {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            direction: 1.0,
            distance: 5.0,
            aspect: 1.0,
            projection: Mat4::IDENTITY,
            last_view_projection: Mat4::IDENTITY,
        }
    }

    fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    /// One wheel notch (120 units) moves the camera by half a unit.
    fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll / 240.0).clamp(1.5, 50.0);
    }

    fn angle(&self) -> f32 {
        self.started.elapsed().as_secs_f32() * 0.5 * self.direction
    }
}

impl RenderPipeline<GpuFrame> for OrbitRenderer {
    fn clear_color(&self) -> Color {
        let t = self.angle();
        Color::new(0.1 + 0.1 * t.sin().abs(), 0.12, 0.2 + 0.1 * t.cos().abs(), 1.0)
    }

    fn preferred_depth_format(&self) -> Option<wgpu::TextureFormat> {
        Some(wgpu::TextureFormat::Depth32Float)
    }

    fn update_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
        self.projection = Mat4::perspective_rh(60f32.to_radians(), self.aspect, 0.1, 100.0);
        log::debug!("projection updated for aspect {:.3}", self.aspect);
    }

    fn camera_root(&self) -> Mat4 {
        let (sin, cos) = self.angle().sin_cos();
        let eye = Vec3::new(cos * self.distance, 1.5, sin * self.distance);
        Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y).inverse()
    }

    fn projection(&self) -> Mat4 {
        self.projection
    }

    fn draw(&mut self, _frame: &mut GpuFrame, view: &Mat4, projection: &Mat4, view_count: u32) {
        // The surface already cleared the frame; the scene is the clear color.
        self.last_view_projection = *projection * *view;
        log::trace!("draw {view_count} view(s), vp col3 {:?}", self.last_view_projection.w_axis);
    }
}
