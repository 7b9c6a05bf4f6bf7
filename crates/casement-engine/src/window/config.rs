use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::translate::TranslateOptions;

/// Window host configuration.
///
/// Every field has a default, so a partial (or empty) TOML document is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Default outer position. `None` lets the window system place the window.
    #[serde(default)]
    pub position: Option<(i32, i32)>,

    /// Default client size in logical pixels.
    #[serde(default = "default_size")]
    pub size: (u32, u32),

    /// Restore the last window rectangle at start and save it at stop.
    #[serde(default)]
    pub persist_geometry: bool,

    /// Side mouse buttons reach the input sink even while unfocused.
    #[serde(default = "default_true")]
    pub extra_buttons_ignore_focus: bool,

    /// Record name used by the geometry store.
    #[serde(default = "default_geometry_key")]
    pub geometry_key: String,

    /// Directory holding persisted geometry.
    #[serde(default = "default_geometry_dir")]
    pub geometry_dir: PathBuf,
}

fn default_title() -> String {
    "casement".to_string()
}
fn default_size() -> (u32, u32) {
    (1280, 720)
}
fn default_true() -> bool {
    true
}
fn default_geometry_key() -> String {
    "WindowLocation".to_string()
}
fn default_geometry_dir() -> PathBuf {
    PathBuf::from("settings")
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            position: None,
            size: default_size(),
            persist_geometry: false,
            extra_buttons_ignore_focus: default_true(),
            geometry_key: default_geometry_key(),
            geometry_dir: default_geometry_dir(),
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid host configuration")
    }

    /// Reads the configuration at `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text).with_context(|| format!("parse {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions {
            extra_buttons_ignore_focus: self.extra_buttons_ignore_focus,
        }
    }
}
