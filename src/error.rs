//! Configuration errors raised while setting up a scene
//!
//! Everything here is fatal for scene setup. The one recoverable condition
//! (a reset with nowhere else to go) is not an error; see
//! [`crate::sim::ResetOutcome::NoAlternateSpawn`].

use std::path::PathBuf;

/// Errors that can occur while loading settings, maps or building a session.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no spawn objects named '{object_name}' found in the map")]
    NoSpawnPoints { object_name: String },

    #[error("session needs at least one spawn point")]
    EmptySpawnSet,

    #[error("initial spawn index {index} out of range ({len} spawn points)")]
    InvalidSpawnIndex { index: usize, len: usize },

    #[error("no collectible objects named '{object_name}' found in the map")]
    NoCollectibles { object_name: String },

    #[error("map layer '{name}' not found")]
    MissingLayer { name: String },

    #[error("no tilemap asset declared during preload")]
    MissingTilemap,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Wrap an I/O failure with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
