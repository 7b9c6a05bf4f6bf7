use std::sync::Arc;
use std::time::{Duration, Instant};

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::application::ApplicationHandler;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::core::RunFlag;
use crate::device::{Surface, SurfaceBackend, SurfaceDesc};
use crate::input::InputSink;
use crate::input::platform::winit::{WindowShape, WinitMessageSource};
use crate::render::RenderPipeline;

use super::config::HostConfig;
use super::error::HostError;
use super::geometry::{self, GeometryStore, JsonGeometryStore, PersistedGeometry};
use super::host_core::WindowCore;
use super::icon::IconProvider;
use super::message::NativeMessage;
use super::state::FocusState;

/// Pumps allowed for the window system to hand out the first event loop callback.
const CREATE_ATTEMPTS: usize = 8;
const CREATE_PUMP_TIMEOUT: Duration = Duration::from_millis(50);

/// Owns the native window and drives its message pump.
///
/// The event loop is created on the first `start()` and kept until the host is
/// dropped, since a process may only ever create one.
pub struct WindowHost<B: SurfaceBackend> {
    config: HostConfig,
    backend: B,
    store: Option<Box<dyn GeometryStore>>,
    icon: Option<Box<dyn IconProvider>>,

    // Field order is drop order: surface (in core), window, then the loop.
    core: WindowCore<B::Surface>,
    source: WinitMessageSource,
    window: Option<Arc<Window>>,
    event_loop: Option<EventLoop<()>>,
}

impl<B: SurfaceBackend> WindowHost<B> {
    pub fn new(config: HostConfig, backend: B, run: RunFlag) -> Self {
        let store = config
            .persist_geometry
            .then(|| Box::new(JsonGeometryStore::from_config(&config)) as Box<dyn GeometryStore>);

        Self {
            core: WindowCore::new(config.translate_options(), run),
            config,
            backend,
            store,
            icon: None,
            source: WinitMessageSource::default(),
            window: None,
            event_loop: None,
        }
    }

    /// Replaces the default JSON store.
    pub fn with_geometry_store(mut self, store: impl GeometryStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn with_icon_provider(mut self, icon: impl IconProvider + 'static) -> Self {
        self.icon = Some(Box::new(icon));
        self
    }

    /// Creates the window and its surface.
    ///
    /// On failure nothing created by this call is left behind. Starting an
    /// already started host returns the existing handle.
    pub fn start<R>(&mut self, renderer: &mut R) -> Result<RawWindowHandle, HostError>
    where
        R: RenderPipeline<<B::Surface as Surface>::Frame> + ?Sized,
    {
        if let Some(handle) = self.hwnd() {
            log::warn!("start() on a running window host");
            return Ok(handle);
        }

        if self.event_loop.is_none() {
            self.event_loop = Some(EventLoop::new().map_err(HostError::EventLoop)?);
        }

        let placement = geometry::initial_placement(&self.config, self.load_geometry());
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(placement.size)
            .with_window_icon(self.icon.as_ref().and_then(|p| p.icon()));
        if let Some(position) = placement.position {
            attrs = attrs.with_position(position);
        }

        let (window, focused) = self.create_window(attrs)?;
        let window = Arc::new(window);

        let handle = window
            .window_handle()
            .map_err(HostError::WindowHandle)?
            .as_raw();

        let inner = window.inner_size();
        let desc = SurfaceDesc {
            size: winit::dpi::PhysicalSize::new(inner.width.max(1), inner.height.max(1)),
            color_format: None,
            depth_format: renderer.preferred_depth_format(),
        };
        let surface = self
            .backend
            .create(window.clone(), desc)
            .map_err(|e| HostError::Surface(e.into()))?;

        self.source = WinitMessageSource::default();
        self.core.attach_surface(surface, renderer);
        // Focus changes during creation never reached the core.
        self.core.sync_focus(focused.unwrap_or_else(|| window.has_focus()));
        self.window = Some(window);

        log::info!("window '{}' started ({}x{})", self.config.title, inner.width, inner.height);
        Ok(handle)
    }

    /// Saves geometry (if enabled), then releases the surface and the window.
    ///
    /// Calling it on a stopped host does nothing.
    pub fn stop(&mut self) {
        let Some(window) = self.window.take() else {
            return;
        };

        if self.config.persist_geometry {
            self.save_geometry(&window);
        }

        drop(self.core.detach_surface());
        drop(window);

        self.core.reset();
        self.source = WinitMessageSource::default();
        log::info!("window '{}' stopped", self.config.title);
    }

    /// Drains all queued window messages without blocking.
    pub fn pump_step<R>(&mut self, input: &mut dyn InputSink, renderer: &mut R)
    where
        R: RenderPipeline<<B::Surface as Surface>::Frame> + ?Sized,
    {
        let (Some(event_loop), Some(window)) = (self.event_loop.as_mut(), self.window.as_deref()) else {
            return;
        };

        let mut dispatcher = Dispatcher {
            core: &mut self.core,
            source: &mut self.source,
            window,
            input,
            renderer,
            scratch: Vec::new(),
        };

        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut dispatcher);
        dispatcher.finish();

        if let PumpStatus::Exit(code) = status {
            log::info!("event loop exited with code {code}");
            self.core.run_flag().stop();
        }
    }

    /// Native handle of the live window, `None` when stopped.
    pub fn hwnd(&self) -> Option<RawWindowHandle> {
        let window = self.window.as_ref()?;
        window.window_handle().ok().map(|h| h.as_raw())
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }

    /// Accumulated wheel delta since the last reset.
    pub fn scroll(&self) -> f32 {
        self.core.state().scroll
    }

    pub fn reset_scroll(&mut self) {
        self.core.state_mut().scroll = 0.0;
    }

    pub fn focus(&self) -> FocusState {
        self.core.state().focus
    }

    pub fn is_started(&self) -> bool {
        self.window.is_some()
    }

    pub fn run_flag(&self) -> &RunFlag {
        self.core.run_flag()
    }

    pub fn core(&self) -> &WindowCore<B::Surface> {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WindowCore<B::Surface> {
        &mut self.core
    }

    /// Returns the window and the last focus state reported while creating it.
    fn create_window(&mut self, attrs: WindowAttributes) -> Result<(Window, Option<bool>), HostError> {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return Err(HostError::EventLoopExited);
        };

        let mut creator = Creator {
            attrs: Some(attrs),
            created: None,
            focused: None,
        };

        for _ in 0..CREATE_ATTEMPTS {
            let status = event_loop.pump_app_events(Some(CREATE_PUMP_TIMEOUT), &mut creator);
            if let Some(created) = creator.created.take() {
                let window = created.map_err(HostError::WindowCreation)?;
                return Ok((window, creator.focused));
            }
            if let PumpStatus::Exit(_) = status {
                break;
            }
        }

        Err(HostError::EventLoopExited)
    }

    fn load_geometry(&self) -> Option<PersistedGeometry> {
        if !self.config.persist_geometry {
            return None;
        }
        let store = self.store.as_ref()?;

        match store.load() {
            Ok(geometry) => geometry,
            Err(e) => {
                log::warn!("ignoring persisted window geometry: {e:#}");
                None
            }
        }
    }

    fn save_geometry(&mut self, window: &Window) {
        let Some(store) = self.store.as_mut() else {
            return;
        };

        let origin = match window.outer_position() {
            Ok(origin) => origin,
            Err(e) => {
                log::warn!("cannot read window position, geometry not saved: {e}");
                return;
            }
        };

        let geometry = PersistedGeometry::from_origin_size(origin, window.inner_size());
        if let Err(e) = store.save(&geometry) {
            log::warn!("failed to persist window geometry: {e:#}");
        }
    }
}

impl<B: SurfaceBackend> Drop for WindowHost<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Creates the window from inside an event loop callback.
struct Creator {
    attrs: Option<WindowAttributes>,
    created: Option<Result<Window, OsError>>,
    focused: Option<bool>,
}

impl Creator {
    fn create(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attrs) = self.attrs.take() {
            self.created = Some(event_loop.create_window(attrs));
        }
    }

    fn observe(&mut self, event: &WindowEvent) {
        if let WindowEvent::Focused(focused) = *event {
            self.focused = Some(focused);
        }
    }
}

impl ApplicationHandler for Creator {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create(event_loop);
    }

    // `resumed` only fires once per loop; later starts create here.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create(event_loop);
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        self.observe(&event);
    }
}

/// Routes one pump's worth of window events through the core.
struct Dispatcher<'a, S: Surface, R: ?Sized> {
    core: &'a mut WindowCore<S>,
    source: &'a mut WinitMessageSource,
    window: &'a Window,
    input: &'a mut dyn InputSink,
    renderer: &'a mut R,
    scratch: Vec<NativeMessage>,
}

impl<S, R> Dispatcher<'_, S, R>
where
    S: Surface,
    R: RenderPipeline<S::Frame> + ?Sized,
{
    fn dispatch_scratch(&mut self) {
        let now = Instant::now();
        for msg in self.scratch.drain(..) {
            self.core.dispatch(&msg, &mut *self.input, &mut *self.renderer, now);
        }
    }

    fn finish(mut self) {
        if let Some(msg) = self.source.finish_pump() {
            self.scratch.push(msg);
            self.dispatch_scratch();
        }
    }
}

impl<S, R> ApplicationHandler for Dispatcher<'_, S, R>
where
    S: Surface,
    R: RenderPipeline<S::Frame> + ?Sized,
{
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if window_id != self.window.id() {
            return;
        }

        let shape = WindowShape::of(self.window);
        self.source.translate(&event, shape, &mut self.scratch);
        self.dispatch_scratch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::host_core::tests::{MockRenderer, MockSurface};
    use std::cell::Cell;
    use std::rc::Rc;

    struct NoWindows;

    impl SurfaceBackend for NoWindows {
        type Surface = MockSurface;

        fn create(&mut self, _: Arc<Window>, _: SurfaceDesc) -> anyhow::Result<MockSurface> {
            anyhow::bail!("no surfaces in unit tests")
        }
    }

    struct CountingStore {
        saves: Rc<Cell<usize>>,
    }

    impl GeometryStore for CountingStore {
        fn load(&self) -> anyhow::Result<Option<PersistedGeometry>> {
            Ok(None)
        }

        fn save(&mut self, _: &PersistedGeometry) -> anyhow::Result<()> {
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    fn persisting_host(saves: &Rc<Cell<usize>>) -> WindowHost<NoWindows> {
        let config = HostConfig { persist_geometry: true, ..HostConfig::default() };
        WindowHost::new(config, NoWindows, RunFlag::new()).with_geometry_store(CountingStore { saves: saves.clone() })
    }

    #[test]
    fn stop_before_start_is_a_noop() {
        let saves = Rc::new(Cell::new(0));
        let mut host = persisting_host(&saves);

        host.stop();
        host.stop();

        assert_eq!(saves.get(), 0);
        assert!(!host.is_started());
        assert!(host.event_loop.is_none());
    }

    #[test]
    fn unstarted_host_has_no_handle_and_pumps_nothing() {
        let saves = Rc::new(Cell::new(0));
        let mut host = persisting_host(&saves);
        let mut renderer = MockRenderer::default();
        let mut input = crate::input::InputQueue::default();

        host.pump_step(&mut input, &mut renderer);

        assert!(host.hwnd().is_none());
        assert!(!host.core().is_initialized());
        assert!(input.frame().events.is_empty());
        assert!(renderer.projections.is_empty());
    }

    #[test]
    fn scroll_reads_and_resets_the_accumulator() {
        let saves = Rc::new(Cell::new(0));
        let mut host = persisting_host(&saves);

        host.core_mut().state_mut().scroll = 240.0;
        assert_eq!(host.scroll(), 240.0);

        host.reset_scroll();
        assert_eq!(host.scroll(), 0.0);
        assert_eq!(host.focus(), FocusState::Active);
    }

    #[test]
    fn creation_remembers_the_last_focus_change() {
        let mut creator = Creator { attrs: None, created: None, focused: None };

        creator.observe(&WindowEvent::RedrawRequested);
        assert_eq!(creator.focused, None);

        creator.observe(&WindowEvent::Focused(true));
        creator.observe(&WindowEvent::Focused(false));
        assert_eq!(creator.focused, Some(false));
    }

    #[test]
    fn geometry_is_not_read_when_persistence_is_off() {
        let host = WindowHost::new(HostConfig::default(), NoWindows, RunFlag::new());
        assert!(host.store.is_none());
        assert!(host.load_geometry().is_none());
    }
}
