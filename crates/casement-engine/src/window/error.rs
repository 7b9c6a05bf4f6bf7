use thiserror::Error;

/// Reasons [`WindowHost::start`](super::WindowHost::start) can fail.
///
/// Nothing created during a failed start survives it.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to register the window class")]
    EventLoop(#[source] winit::error::EventLoopError),

    #[error("failed to create the window")]
    WindowCreation(#[source] winit::error::OsError),

    #[error("the event loop exited before the window could be created")]
    EventLoopExited,

    #[error("the window has no native handle")]
    WindowHandle(#[source] raw_window_handle::HandleError),

    #[error("failed to create the presentation surface")]
    Surface(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
