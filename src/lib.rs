//! Fog Crawl - a dark tile-map exploration scene
//!
//! Core modules:
//! - `sim`: Deterministic session logic (collection cycle, vision mask, frame tick)
//! - `map`: Tiled JSON metadata (spawn points, potion layout, reset floor)
//! - `scene`: Three-phase scene lifecycle (preload / create / update)
//! - `host`: Headless driver that runs a scene from assets on disk
//! - `settings`: Data-driven tuning and map schema names

pub mod error;
pub mod host;
pub mod map;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{MapSchema, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed frame timestep used by the headless host (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Viewport size in pixels
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player walking speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 150.0;
    /// Spritesheet frame size
    pub const PLAYER_FRAME_WIDTH: f32 = 32.0;
    pub const PLAYER_FRAME_HEIGHT: f32 = 48.0;
    /// Sprite scale applied at spawn
    pub const PLAYER_SCALE: f32 = 0.5;

    /// Potion body size after scaling (pixels)
    pub const COLLECTIBLE_SIZE: f32 = 12.0;

    /// Radius of the visible circle around the player
    pub const VISION_RADIUS: f32 = 100.0;
    /// Opacity of the black darkness overlay
    pub const DARKNESS_ALPHA: f32 = 0.95;
}
