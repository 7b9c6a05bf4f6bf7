use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize, Position, Size};

use super::config::HostConfig;

/// Window rectangle kept between runs.
///
/// `left`/`top` are the outer window origin; `right - left` and `bottom - top`
/// are the client size. All values are physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PersistedGeometry {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PersistedGeometry {
    pub fn from_origin_size(origin: PhysicalPosition<i32>, size: PhysicalSize<u32>) -> Self {
        let width = i32::try_from(size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(size.height).unwrap_or(i32::MAX);
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x.saturating_add(width),
            bottom: origin.y.saturating_add(height),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Keyed storage for the single geometry record.
pub trait GeometryStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedGeometry>>;
    fn save(&mut self, geometry: &PersistedGeometry) -> Result<()>;
}

/// Stores the record as `<dir>/<app>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonGeometryStore {
    path: PathBuf,
}

impl JsonGeometryStore {
    pub fn new(dir: impl Into<PathBuf>, app: &str, key: &str) -> Self {
        let mut path = dir.into();
        path.push(sanitize(app));
        path.push(format!("{}.json", sanitize(key)));
        Self { path }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(&config.geometry_dir, &config.title, &config.geometry_key)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GeometryStore for JsonGeometryStore {
    fn load(&self) -> Result<Option<PersistedGeometry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read {}", self.path.display())),
        };

        let geometry = serde_json::from_str(&text)
            .with_context(|| format!("parse {}", self.path.display()))?;
        Ok(Some(geometry))
    }

    fn save(&mut self, geometry: &PersistedGeometry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }

        let text = serde_json::to_string_pretty(geometry)?;
        fs::write(&self.path, text).with_context(|| format!("write {}", self.path.display()))
    }
}

/// Keeps a name usable as a single path component.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() { "_".to_string() } else { cleaned }
}

/// Where and how large the window opens.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InitialPlacement {
    /// Outer position; `None` leaves placement to the window system.
    pub position: Option<Position>,
    /// Client size.
    pub size: Size,
}

/// Picks the opening rectangle from persisted geometry or the configured defaults.
///
/// Persisted origins are clamped to the positive quadrant. A persisted axis
/// with no extent takes the configured length for that axis, in pixels like
/// the rest of the record.
pub fn initial_placement(config: &HostConfig, persisted: Option<PersistedGeometry>) -> InitialPlacement {
    match persisted {
        Some(g) => {
            let axis = |extent: i32, fallback: u32| u32::try_from(extent).ok().filter(|&v| v > 0).unwrap_or(fallback);
            let width = axis(g.width(), config.size.0);
            let height = axis(g.height(), config.size.1);

            InitialPlacement {
                position: Some(Position::Physical(PhysicalPosition::new(g.left.max(0), g.top.max(0)))),
                size: Size::Physical(PhysicalSize::new(width, height)),
            }
        }
        None => InitialPlacement {
            position: config
                .position
                .map(|(x, y)| Position::Logical(LogicalPosition::new(x.max(0) as f64, y.max(0) as f64))),
            size: Size::Logical(LogicalSize::new(config.size.0 as f64, config.size.1 as f64)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("casement-geometry-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    // ── store ─────────────────────────────────────────────────────────────

    #[test]
    fn load_before_save_is_none() {
        let dir = scratch_dir("empty");
        let store = JsonGeometryStore::new(&dir, "app", "WindowLocation");
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = scratch_dir("roundtrip");
        let mut store = JsonGeometryStore::new(&dir, "my app", "WindowLocation");
        let g = PersistedGeometry { left: 10, top: 20, right: 810, bottom: 620 };

        store.save(&g).unwrap();
        assert!(store.path().starts_with(dir.join("my_app")));
        assert_eq!(store.load().unwrap(), Some(g));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_record_is_an_error() {
        let dir = scratch_dir("corrupt");
        let store = JsonGeometryStore::new(&dir, "app", "key");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    // ── rectangle ─────────────────────────────────────────────────────────

    #[test]
    fn origin_and_client_size_roundtrip() {
        let g = PersistedGeometry::from_origin_size(PhysicalPosition::new(-5, 30), PhysicalSize::new(640, 480));
        assert_eq!(g, PersistedGeometry { left: -5, top: 30, right: 635, bottom: 510 });
        assert_eq!((g.width(), g.height()), (640, 480));
    }

    // ── placement ─────────────────────────────────────────────────────────

    #[test]
    fn no_record_uses_configured_defaults() {
        let cfg = HostConfig { position: Some((-20, 50)), ..HostConfig::default() };
        let p = initial_placement(&cfg, None);

        assert_eq!(p.position, Some(Position::Logical(LogicalPosition::new(0.0, 50.0))));
        assert_eq!(p.size, Size::Logical(LogicalSize::new(1280.0, 720.0)));
    }

    #[test]
    fn no_record_and_no_position_lets_system_place() {
        let p = initial_placement(&HostConfig::default(), None);
        assert_eq!(p.position, None);
    }

    #[test]
    fn record_wins_and_origin_is_clamped() {
        let g = PersistedGeometry { left: -100, top: 40, right: 700, bottom: 640 };
        let p = initial_placement(&HostConfig::default(), Some(g));

        assert_eq!(p.position, Some(Position::Physical(PhysicalPosition::new(0, 40))));
        assert_eq!(p.size, Size::Physical(PhysicalSize::new(800, 600)));
    }

    #[test]
    fn zero_width_record_substitutes_only_the_width() {
        let g = PersistedGeometry { left: 30, top: 40, right: 30, bottom: 400 };
        let p = initial_placement(&HostConfig::default(), Some(g));

        assert_eq!(p.position, Some(Position::Physical(PhysicalPosition::new(30, 40))));
        assert_eq!(p.size, Size::Physical(PhysicalSize::new(1280, 360)));
    }

    #[test]
    fn zero_height_record_substitutes_only_the_height() {
        let g = PersistedGeometry { left: 0, top: 50, right: 500, bottom: 50 };
        let p = initial_placement(&HostConfig::default(), Some(g));

        assert_eq!(p.size, Size::Physical(PhysicalSize::new(500, 720)));
    }

    #[test]
    fn inverted_record_substitutes_both_axes() {
        let g = PersistedGeometry { left: 100, top: 100, right: 50, bottom: 20 };
        let p = initial_placement(&HostConfig::default(), Some(g));

        assert_eq!(p.size, Size::Physical(PhysicalSize::new(1280, 720)));
    }
}
