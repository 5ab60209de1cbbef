//! Game settings and tuning
//!
//! Persisted in LocalStorage on the web. Every field has a default, so a
//! stored document only needs the values it wants to change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a settings document was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON for `Settings`
    Parse(serde_json::Error),
    /// A field holds a value the game cannot run with
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "could not parse settings: {e}"),
            SettingsError::Invalid(field) => write!(f, "invalid value for `{field}`"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulated canvas size in pixels
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    pub player_radius: f32,
    /// Pixels per frame
    pub player_speed: f32,

    // === Trail ===
    /// How long a trail point stays visible (ms)
    pub trail_duration_ms: f64,
    /// Max trail points kept
    pub trail_max_length: usize,

    // === Light/dark cycle ===
    pub light_duration_ms: f64,
    pub dark_duration_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            trail_duration_ms: TRAIL_DURATION_MS,
            trail_max_length: TRAIL_MAX_LENGTH,
            light_duration_ms: LIGHT_MODE_DURATION_MS,
            dark_duration_ms: DARK_MODE_DURATION_MS,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "echo_maze_settings";

    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain numeric struct; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.canvas_width as f64) {
            return Err(SettingsError::Invalid("canvas_width"));
        }
        if !positive(self.canvas_height as f64) {
            return Err(SettingsError::Invalid("canvas_height"));
        }
        if !positive(self.player_radius as f64)
            || 2.0 * self.player_radius > self.canvas_width.min(self.canvas_height)
        {
            return Err(SettingsError::Invalid("player_radius"));
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(SettingsError::Invalid("player_speed"));
        }
        if !positive(self.trail_duration_ms) {
            return Err(SettingsError::Invalid("trail_duration_ms"));
        }
        if self.trail_max_length == 0 {
            return Err(SettingsError::Invalid("trail_max_length"));
        }
        if !positive(self.light_duration_ms) {
            return Err(SettingsError::Invalid("light_duration_ms"));
        }
        if !positive(self.dark_duration_ms) {
            return Err(SettingsError::Invalid("dark_duration_ms"));
        }
        Ok(())
    }

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
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
