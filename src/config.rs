//! Editor configuration
//!
//! Stored as RON so it stays hand-editable. Every field has a default, so a
//! partial file (or none at all) is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Catalog file used when no config overrides it
pub const DEFAULT_CATALOG_PATH: &str = "starPusherLevels.txt";

/// Config file looked up in the working directory first
pub const LOCAL_CONFIG_FILE: &str = "star_pusher_editor.ron";

const APP_DIR: &str = "star-pusher-editor";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Image paths for each placeable tile. `None` draws a plain shape instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileImages {
    pub wall: Option<String>,
    pub star: Option<String>,
    pub player: Option<String>,
    pub goal: Option<String>,
}

impl Default for TileImages {
    fn default() -> Self {
        Self {
            wall: Some("img/Wall_Block_Tall.png".to_string()),
            star: Some("img/Star.png".to_string()),
            player: Some("img/princess.png".to_string()),
            goal: Some("img/RedSelector.png".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Level catalog, relative to the working directory
    pub catalog_path: String,
    /// Create an empty catalog at startup if none exists
    pub create_catalog_if_missing: bool,
    pub window_width: i32,
    pub window_height: i32,
    /// Edge length of one board tile in pixels
    pub tile_size: f32,
    /// Camera pan speed in pixels per frame
    pub camera_speed: f32,
    pub tile_images: TileImages,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            create_catalog_if_missing: true,
            window_width: 800,
            window_height: 800,
            tile_size: 60.0,
            camera_speed: 5.0,
            tile_images: TileImages::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from RON text
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Load the first config found in the usual places, or the defaults
    ///
    /// A config that exists but fails to parse is logged and skipped.
    pub fn discover() -> Self {
        for path in Self::search_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("Ignoring config {}: {}", path.display(), e),
            }
        }
        log::info!("No config found, using defaults");
        Self::default()
    }

    fn search_paths() -> Vec<PathBuf> {
        #[allow(unused_mut)]
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(dir) = dirs::config_dir() {
                paths.push(dir.join(APP_DIR).join("config.ron"));
            }
        }
        paths
    }
}

/// Directory for rotated log files, created on demand
#[cfg(not(target_arch = "wasm32"))]
pub fn log_dir() -> Option<PathBuf> {
    let dir = dirs::data_local_dir()?.join(APP_DIR).join("logs");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

#[cfg(target_arch = "wasm32")]
pub fn log_dir() -> Option<PathBuf> {
    None
}
