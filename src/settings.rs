//! Game settings
//!
//! Board size, speed and input pacing. Persisted in LocalStorage on web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Snake speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedPreset::Slow),
            "normal" | "norm" => Some(SpeedPreset::Normal),
            "fast" => Some(SpeedPreset::Fast),
            _ => None,
        }
    }

    /// Tick period for this preset (ms)
    pub fn tick_ms(&self) -> u32 {
        match self {
            SpeedPreset::Slow => 150,
            SpeedPreset::Normal => DEFAULT_TICK_MS,
            SpeedPreset::Fast => 70,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Columns on the board
    pub grid_width: u32,
    /// Rows on the board
    pub grid_height: u32,

    // === Pacing ===
    /// Speed preset the tick period was last derived from
    pub speed: SpeedPreset,
    /// Simulation tick period (ms)
    pub tick_ms: u32,
    /// Direction requests closer together than this are dropped (ms)
    pub min_input_interval_ms: u32,

    // === Scoring ===
    /// Points per food eaten
    pub food_reward: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,

            speed: SpeedPreset::Normal,
            tick_ms: DEFAULT_TICK_MS,
            min_input_interval_ms: DEFAULT_MIN_INPUT_INTERVAL_MS,

            food_reward: FOOD_REWARD,
        }
    }
}

impl Settings {
    /// Create settings from a speed preset
    pub fn from_preset(preset: SpeedPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a speed preset (overwrites the tick period)
    pub fn apply_preset(&mut self, preset: SpeedPreset) {
        self.speed = preset;
        self.tick_ms = preset.tick_ms();
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.grid_width, self.grid_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroGridDimension { width, height });
        }
        for dim in [width, height] {
            if i32::try_from(dim).is_err() {
                return Err(ConfigError::GridTooLarge(dim));
            }
        }
        // Snake and food each need a cell
        if u64::from(width) * u64::from(height) < 2 {
            return Err(ConfigError::BoardTooSmall { width, height });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snake_arcade_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native: read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid_width, 20);
        assert_eq!(settings.tick_ms, 100);
        assert_eq!(settings.min_input_interval_ms, 50);
        assert_eq!(settings.food_reward, 10);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let settings = Settings {
            grid_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ZeroGridDimension { width: 0, height: 20 })
        ));
    }

    #[test]
    fn test_single_cell_board_rejected() {
        let settings = Settings {
            grid_width: 1,
            grid_height: 1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::BoardTooSmall { .. })
        ));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let settings = Settings {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::ZeroTickPeriod)));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{"grid_width": 30, "tick_ms": 80}"#).unwrap();
        assert_eq!(settings.grid_width, 30);
        assert_eq!(settings.grid_height, 20);
        assert_eq!(settings.tick_ms, 80);
    }

    #[test]
    fn test_from_json_negative_size_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"grid_width": -5}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_preset_sets_tick() {
        let settings = Settings::from_preset(SpeedPreset::Fast);
        assert_eq!(settings.speed, SpeedPreset::Fast);
        assert_eq!(settings.tick_ms, 70);
        assert_eq!(SpeedPreset::from_str("SLOW"), Some(SpeedPreset::Slow));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("snake_arcade_no_such_settings.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "snake_arcade_settings_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"grid_height": 12}"#).unwrap();
        let settings = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(settings.unwrap().grid_height, 12);
    }
}
