use std::time::Instant;

use winit::dpi::PhysicalSize;

use crate::core::RunFlag;
use crate::device::Surface;
use crate::input::InputSink;
use crate::render::RenderPipeline;

use super::message::NativeMessage;
use super::state::{FocusState, WindowState};
use super::translate::{self, TranslateOptions, WindowAction};

/// Window-system independent half of the host.
///
/// Holds the window bookkeeping and the surface, and applies translated
/// messages to them. Everything a native message can change flows through
/// [`WindowCore::dispatch`], so synthetic message sequences exercise the same
/// path as a real window.
pub struct WindowCore<S> {
    state: WindowState,
    options: TranslateOptions,
    run: RunFlag,

    surface: Option<S>,

    /// Published display size. Authoritative for resize comparisons.
    display: PhysicalSize<u32>,
}

impl<S: Surface> WindowCore<S> {
    pub fn new(options: TranslateOptions, run: RunFlag) -> Self {
        Self {
            state: WindowState::default(),
            options,
            run,
            surface: None,
            display: PhysicalSize::new(0, 0),
        }
    }

    /// Takes ownership of a freshly created surface and publishes its size.
    pub fn attach_surface<R>(&mut self, surface: S, renderer: &mut R)
    where
        R: RenderPipeline<S::Frame> + ?Sized,
    {
        let size = surface.size();
        log::debug!(
            "created surface {}x{} color:{:?} depth:{:?}",
            size.width,
            size.height,
            surface.color_format(),
            surface.depth_format(),
        );

        self.display = size;
        self.surface = Some(surface);
        renderer.update_projection(size.width, size.height);
    }

    /// Releases the surface. The core reads as uninitialized afterwards.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Returns to the pre-start state. The surface must already be detached.
    pub fn reset(&mut self) {
        debug_assert!(self.surface.is_none(), "reset with a live surface");
        self.state = WindowState::default();
        self.display = PhysicalSize::new(0, 0);
    }

    /// Aligns the focus state with what the window system reports.
    pub fn sync_focus(&mut self, focused: bool) {
        self.state.focus = if focused { FocusState::Active } else { FocusState::Background };
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WindowState {
        &mut self.state
    }

    pub fn display_size(&self) -> PhysicalSize<u32> {
        self.display
    }

    pub fn run_flag(&self) -> &RunFlag {
        &self.run
    }

    /// Handles one native message. Returns whether it should also reach the
    /// platform's default handling.
    pub fn dispatch<R>(
        &mut self,
        msg: &NativeMessage,
        input: &mut dyn InputSink,
        renderer: &mut R,
        now: Instant,
    ) -> bool
    where
        R: RenderPipeline<S::Frame> + ?Sized,
    {
        let translation = translate::translate(msg, &mut self.state, &self.options, now);

        for action in translation.actions {
            match action {
                WindowAction::Input(ev) => input.inject(ev),
                WindowAction::Resize(size) => self.resize(size.width, size.height, renderer),
                WindowAction::Quit => {
                    log::info!("window close requested");
                    self.run.stop();
                }
            }
        }

        if translation.pass_through {
            log::trace!("default handling for {msg:?}");
        }
        translation.pass_through
    }

    /// Applies a committed size to the surface.
    ///
    /// Dimensions clamp to 1. Nothing happens without a surface or when the
    /// size matches the published display size.
    pub fn resize<R>(&mut self, width: u32, height: u32, renderer: &mut R)
    where
        R: RenderPipeline<S::Frame> + ?Sized,
    {
        let size = PhysicalSize::new(width.max(1), height.max(1));

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if size == self.display {
            return;
        }

        self.display = size;
        log::debug!("resized to {}x{}", size.width, size.height);

        surface.resize(size);
        renderer.update_projection(size.width, size.height);
    }
}
