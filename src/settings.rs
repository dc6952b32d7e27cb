//! Engine settings
//!
//! Configuration only, never game state. Persisted in LocalStorage on the
//! web; read from the `TOMO_SETTINGS` environment variable natively.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BOSS_FREQUENCY, DEFAULT_FPS, LEVEL_TRANSITION_FRAMES};
use crate::error::SettingsError;
use crate::renderer::Color;

/// A selectable ship color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub name: String,
    pub color: Color,
}

impl Skin {
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

fn default_palette() -> Vec<Skin> {
    vec![
        Skin::new("Cyan", Color::rgb(0, 200, 255)),
        Skin::new("Lime", Color::rgb(120, 255, 80)),
        Skin::new("Magenta", Color::rgb(255, 60, 200)),
        Skin::new("Amber", Color::rgb(255, 180, 40)),
        Skin::new("Crimson", Color::rgb(230, 40, 60)),
        Skin::new("Ivory", Color::rgb(240, 240, 225)),
    ]
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frame rate for the throttle
    pub fps: u32,
    /// Every Nth level is a boss level
    pub boss_frequency: u32,
    /// Length of the between-levels screen
    pub transition_frames: u32,
    /// RNG seed; `None` picks one at startup
    pub seed: Option<u64>,
    pub palette: Vec<Skin>,
    /// Index into `palette` used for new games
    pub skin: usize,
    pub show_stars: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            boss_frequency: DEFAULT_BOSS_FREQUENCY,
            transition_frames: LEVEL_TRANSITION_FRAMES,
            seed: None,
            palette: default_palette(),
            skin: 0,
            show_stars: true,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be at least 1".into()));
        }
        if self.boss_frequency == 0 {
            return Err(SettingsError::Invalid("boss_frequency must be at least 1".into()));
        }
        if self.transition_frames == 0 {
            return Err(SettingsError::Invalid("transition_frames must be at least 1".into()));
        }
        if self.palette.is_empty() {
            return Err(SettingsError::Invalid("palette must not be empty".into()));
        }
        if self.skin >= self.palette.len() {
            return Err(SettingsError::Invalid(format!(
                "skin {} is outside a palette of {}",
                self.skin,
                self.palette.len()
            )));
        }
        Ok(())
    }

    /// Minimum milliseconds between processed frames
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.fps.max(1) as f64
    }

    /// Parse `json`, falling back to defaults on any error
    fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(err) => {
                log::warn!("Ignoring stored settings: {err}");
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "tomo_settings";

    /// Native environment variable
    pub const ENV_VAR: &'static str = "TOMO_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::from_json_or_default(&json);
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

    /// Load settings from `TOMO_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // Native settings come from the environment; nothing to write
        log::debug!("Settings save skipped on native (key {})", Self::STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.boss_frequency, 5);
        assert_eq!(settings.transition_frames, 180);
        assert_eq!(settings.palette.len(), 6);
        assert!(settings.show_stars);
        assert!(settings.validate().is_ok());
        assert!((settings.frame_interval_ms() - 16.666).abs() < 0.01);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"fps": 30, "seed": 7}"#).unwrap();
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.boss_frequency, 5);
        assert_eq!(settings.palette.len(), 6);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for json in [
            r#"{"fps": 0}"#,
            r#"{"boss_frequency": 0}"#,
            r#"{"transition_frames": 0}"#,
            r#"{"palette": []}"#,
            r#"{"skin": 6}"#,
        ] {
            assert!(
                matches!(Settings::from_json(json), Err(SettingsError::Invalid(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Settings::from_json("{fps:"), Err(SettingsError::Parse(_))));
        assert_eq!(Settings::from_json_or_default("nope"), Settings::default());
    }

    #[test]
    fn test_roundtrip_palette_colors() {
        let json = r#"{"palette": [{"name": "Teal", "color": {"r": 0, "g": 128, "b": 128}}]}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.palette, vec![Skin::new("Teal", Color::rgb(0, 128, 128))]);
    }
}
