//! Native window host.
//!
//! `WindowHost` owns the winit window and its surface; `WindowCore` holds the
//! platform-independent half (focus, scroll, resize debouncing) that every
//! native message is dispatched through.

mod config;
mod debounce;
mod error;
mod geometry;
mod host;
pub(crate) mod host_core;
mod icon;
mod message;
mod state;
mod translate;

pub use config::HostConfig;
pub use debounce::ResizePending;
pub use error::HostError;
pub use geometry::{GeometryStore, InitialPlacement, JsonGeometryStore, PersistedGeometry, initial_placement};
pub use host::WindowHost;
pub use host_core::WindowCore;
pub use icon::{ExecutableIconProvider, IconProvider};
pub use message::{NativeMessage, SizeMode, SysCommand};
pub use state::{FocusState, WindowState};
pub use translate::{DELETE_CHAR, TranslateOptions, Translation, WindowAction, translate};
