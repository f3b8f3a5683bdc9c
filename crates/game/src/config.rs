//! Game configuration (window, flight variant, tuning, key bindings). Loaded from config.ron at startup.

use flight::{FlightTuning, Variant};
use input::KeyBindings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Scene variant: `standard` (full flight model) or `basic`.
    #[serde(default)]
    pub variant: Variant,
    /// Replaces the variant's tuning entirely when present. Missing fields take standard values.
    #[serde(default)]
    pub tuning: Option<FlightTuning>,
    /// Replaces the default key bindings when present.
    #[serde(default)]
    pub key_bindings: Option<KeyBindings>,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            variant: Variant::default(),
            tuning: None,
            key_bindings: None,
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is invalid, returns default config;
    /// if it is missing, writes the defaults there for editing.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            let config = Self::default();
            log::info!("No config found, writing defaults to {:?}", path);
            config.save_to(&path);
            return config;
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save config as pretty RON. Logs on error.
    pub fn save_to(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// Tuning the simulation runs with.
    pub fn flight_tuning(&self) -> FlightTuning {
        self.tuning.clone().unwrap_or_else(|| self.variant.tuning())
    }

    pub fn bindings(&self) -> KeyBindings {
        self.key_bindings.clone().unwrap_or_default()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}
