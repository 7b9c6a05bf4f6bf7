use std::time::Duration;

use anyhow::Result;

use crate::device::{Surface, SurfaceBackend};
use crate::input::InputSink;
use crate::render::RenderPipeline;
use crate::time::FrameClock;
use crate::window::{WindowCore, WindowHost};

/// Outcome of one frame step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// Drawn and presented.
    Presented,
    /// The surface had no image to give this step; nothing was drawn.
    Skipped,
    /// No surface exists (host not started).
    NoSurface,
}

/// Drives one pump → draw → present cycle per call.
#[derive(Debug, Default)]
pub struct FrameDriver {
    clock: FrameClock,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame: drains queued window messages, then draws and presents.
    pub fn step<B, R>(
        &mut self,
        host: &mut WindowHost<B>,
        renderer: &mut R,
        input: &mut dyn InputSink,
    ) -> Result<FrameStatus>
    where
        B: SurfaceBackend,
        R: RenderPipeline<<B::Surface as Surface>::Frame>,
    {
        self.clock.begin();
        host.pump_step(input, renderer);
        self.end_frame(host.core_mut(), renderer)
    }

    /// End-of-frame half of [`FrameDriver::step`].
    ///
    /// Presents exactly once, after all drawing for the step has been issued.
    pub fn end_frame<S, R>(&mut self, core: &mut WindowCore<S>, renderer: &mut R) -> Result<FrameStatus>
    where
        S: Surface,
        R: RenderPipeline<S::Frame> + ?Sized,
    {
        let Some(surface) = core.surface_mut() else {
            return Ok(FrameStatus::NoSurface);
        };

        let view = renderer.camera_root().inverse();
        let projection = renderer.projection();

        let Some(mut frame) = surface.bind(renderer.clear_color())? else {
            self.clock.end();
            return Ok(FrameStatus::Skipped);
        };

        renderer.draw(&mut frame, &view, &projection, 1);
        surface.present(frame);

        let duration = self.clock.end();
        log::trace!("frame {} took {duration:?}", self.clock.frame_index());
        Ok(FrameStatus::Presented)
    }

    /// Duration of the last completed frame.
    pub fn last_frame_duration(&self) -> Duration {
        self.clock.last_frame_duration()
    }

    pub fn frame_index(&self) -> u64 {
        self.clock.frame_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    use crate::core::RunFlag;
    use crate::window::TranslateOptions;
    use crate::window::host_core::tests::{MockRenderer, MockSurface};

    fn started() -> (WindowCore<MockSurface>, MockRenderer) {
        let mut core = WindowCore::new(TranslateOptions::default(), RunFlag::new());
        let mut r = MockRenderer::default();
        core.attach_surface(MockSurface::sized(64, 64), &mut r);
        (core, r)
    }

    #[test]
    fn presents_once_per_step_after_drawing() {
        let (mut core, mut r) = started();
        let mut d = FrameDriver::new();

        assert_eq!(d.end_frame(&mut core, &mut r).unwrap(), FrameStatus::Presented);
        assert_eq!(d.end_frame(&mut core, &mut r).unwrap(), FrameStatus::Presented);

        let s = core.surface().unwrap();
        assert_eq!(s.binds, 2);
        assert_eq!(s.presents, 2);
        assert_eq!(r.draws.len(), 2);
        assert_eq!(d.frame_index(), 2);
    }

    #[test]
    fn view_is_inverse_camera_root() {
        let (mut core, mut r) = started();
        r.camera = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        FrameDriver::new().end_frame(&mut core, &mut r).unwrap();

        let (view, proj, count) = r.draws[0];
        assert!(view.abs_diff_eq(Mat4::from_translation(Vec3::new(-1.0, -2.0, -3.0)), 1e-6));
        assert_eq!(proj, Mat4::from_scale(Vec3::splat(2.0)));
        assert_eq!(count, 1);
    }

    #[test]
    fn skipped_bind_neither_draws_nor_presents() {
        let (mut core, mut r) = started();
        core.surface_mut().unwrap().fail_bind = true;

        let status = FrameDriver::new().end_frame(&mut core, &mut r).unwrap();
        assert_eq!(status, FrameStatus::Skipped);
        assert!(r.draws.is_empty());
        assert_eq!(core.surface().unwrap().presents, 0);
    }

    #[test]
    fn no_surface_no_frame() {
        let mut core: WindowCore<MockSurface> = WindowCore::new(TranslateOptions::default(), RunFlag::new());
        let mut r = MockRenderer::default();
        let status = FrameDriver::new().end_frame(&mut core, &mut r).unwrap();
        assert_eq!(status, FrameStatus::NoSurface);
    }
}
