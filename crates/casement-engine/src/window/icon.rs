use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use winit::window::Icon;

/// Supplies the window icon at start.
pub trait IconProvider {
    fn icon(&self) -> Option<Icon>;
}

/// Loads `<exe-stem>.png` from beside the running executable.
#[derive(Debug, Clone, Default)]
pub struct ExecutableIconProvider {
    path: Option<PathBuf>,
}

impl ExecutableIconProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `path` instead of the executable's sibling.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    fn resolve(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let exe = std::env::current_exe().context("locate executable")?;
        Ok(exe.with_extension("png"))
    }
}

impl IconProvider for ExecutableIconProvider {
    fn icon(&self) -> Option<Icon> {
        let loaded = self.resolve().and_then(|path| load_png_icon(&path));
        match loaded {
            Ok(icon) => Some(icon),
            Err(e) => {
                log::debug!("no window icon: {e:#}");
                None
            }
        }
    }
}

fn load_png_icon(path: &Path) -> Result<Icon> {
    let image = image::open(path)
        .with_context(|| format!("decode {}", path.display()))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).context("build icon from rgba")
}
