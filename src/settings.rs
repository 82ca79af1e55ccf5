//! Presentation settings
//!
//! Read once at startup from an optional JSON file. The arena and combat
//! numbers are not configurable; see `consts`.

use serde::{Deserialize, Serialize};

/// Camera model used to project the mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraMode {
    /// Eye-level view from the player's position
    FirstPerson,
    /// Trailing camera behind the player
    #[default]
    ThirdPerson,
}

impl CameraMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::FirstPerson => "first-person",
            CameraMode::ThirdPerson => "third-person",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "first-person" | "first" | "fps" => Some(CameraMode::FirstPerson),
            "third-person" | "third" | "tps" => Some(CameraMode::ThirdPerson),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraMode,
    /// Seed for enemy aim jitter
    pub seed: u64,
    /// Length of a headless run, in ticks
    pub demo_ticks: u32,
    /// Draw bullet trails while slow motion is active
    pub slow_motion_trails: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera: CameraMode::ThirdPerson,
            seed: 0x5EED,
            demo_ticks: 60 * 60,
            slow_motion_trails: true,
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file
    pub const PATH_ENV: &'static str = "HEROS_MISSION_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from the file named by `HEROS_MISSION_SETTINGS`, falling back to
    /// defaults when unset or unreadable
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {path}");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {path}: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {path}: {e}");
                Self::default()
            }
        }
    }
}
