//! Game settings
//!
//! Loaded from an optional JSON file; any field left out takes its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_WORLD_SIZE_PX, SPAWN_INTERVAL_FRAMES};
use crate::error::SettingsError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// World width in pixels
    pub width_px: u32,
    /// World height in pixels
    pub height_px: u32,
    /// Spawn RNG seed (random when absent)
    pub seed: Option<u64>,

    // === Spawning ===
    /// Frames between bullet spawns
    pub spawn_interval: u64,

    // === Headless runs ===
    /// Frames to simulate before stopping
    pub frames: u64,
    /// Flip the player's pull every this many frames (0 = never)
    pub toggle_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_WORLD_SIZE_PX,
            height_px: DEFAULT_WORLD_SIZE_PX,
            seed: None,

            spawn_interval: SPAWN_INTERVAL_FRAMES,

            frames: 3600,
            toggle_every: 0,
        }
    }
}

impl Settings {
    /// Largest edge that still fits in the fixed-point range with headroom
    /// for squared distances
    pub const MAX_EDGE_PX: u32 = 1 << 20;

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [("width_px", self.width_px), ("height_px", self.height_px)] {
            if value == 0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
            if value > Self::MAX_EDGE_PX {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "too large for fixed-point coordinates",
                });
            }
        }
        if self.spawn_interval == 0 {
            return Err(SettingsError::Invalid {
                field: "spawn_interval",
                reason: "must be at least one frame",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.width_px, 640);
        assert_eq!(settings.spawn_interval, 20);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 5, "frames": 10 }"#).unwrap();
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.frames, 10);
        assert_eq!(settings.height_px, 640);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "width_px": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "width_px", .. }));

        let err = Settings::from_json(r#"{ "spawn_interval": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "spawn_interval", .. }));

        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, SettingsError::Serialization(_)));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("repel-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(77),
            toggle_every: 90,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/repel/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
