//! Game settings and map schema
//!
//! Loaded from an optional JSON file; any missing field falls back to its
//! default, so a settings file only needs the values it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Names used to find gameplay metadata inside a Tiled map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSchema {
    /// Object layer holding spawn and potion objects
    pub object_layer: String,
    /// Object name marking a player spawn
    pub spawn_name: String,
    /// Object name marking a potion
    pub collectible_name: String,
    /// Tile layer whose non-empty cells form the reset floor
    pub reset_layer: String,
}

impl Default for MapSchema {
    fn default() -> Self {
        Self {
            object_layer: "objetos".to_string(),
            spawn_name: "pj".to_string(),
            collectible_name: "pocion".to_string(),
            reset_layer: "suelo2".to_string(),
        }
    }
}

/// Tunable gameplay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// RNG seed for spawn selection
    pub seed: u64,
    /// Index into the spawn list used at scene start
    pub initial_spawn: usize,

    // === Movement ===
    pub player_speed: f32,
    /// Potion body size (pixels, square)
    pub collectible_size: f32,

    // === Vision ===
    pub vision_radius: f32,
    pub darkness_alpha: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Map ===
    pub schema: MapSchema,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            initial_spawn: 0,

            player_speed: PLAYER_SPEED,
            collectible_size: COLLECTIBLE_SIZE,

            vision_radius: VISION_RADIUS,
            darkness_alpha: DARKNESS_ALPHA,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            schema: MapSchema::default(),
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }
}
