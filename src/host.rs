//! Headless host
//!
//! Runs a [`Scene`] without a window: resolves the preload manifest from an
//! assets directory, calls `create` once, then steps `update` at a fixed dt.
//! Only the tilemap is actually read; images are checked for presence so a
//! broken asset tree shows up in the log.

use std::path::PathBuf;

use glam::Vec2;

use crate::error::ConfigError;
use crate::map::MapMetadata;
use crate::scene::{AssetManifest, Scene};
use crate::sim::{SessionEvent, SessionPhase, TickInput};

/// Totals gathered over a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub potions_collected: u32,
    pub relocations: u32,
    pub skipped_resets: u32,
    pub final_phase: Option<SessionPhase>,
    pub final_pos: Vec2,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self {
            frames: 0,
            potions_collected: 0,
            relocations: 0,
            skipped_resets: 0,
            final_phase: None,
            final_pos: Vec2::ZERO,
        }
    }
}

impl RunSummary {
    fn record(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::CollectibleCollected { .. } => self.potions_collected += 1,
            SessionEvent::PlayerRelocated { .. } => self.relocations += 1,
            SessionEvent::ResetSkipped => self.skipped_resets += 1,
            SessionEvent::CollectibleSpawned { .. } | SessionEvent::AllCollected => {}
        }
    }
}

/// Drives a scene from assets on disk
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    assets_root: PathBuf,
    dt: f32,
}

impl HeadlessHost {
    pub fn new(assets_root: impl Into<PathBuf>, dt: f32) -> Self {
        Self {
            assets_root: assets_root.into(),
            dt,
        }
    }

    /// Asset resolution phase: read the tilemap, check the rest exist
    pub fn resolve(&self, manifest: &AssetManifest) -> Result<MapMetadata, ConfigError> {
        for entry in &manifest.entries {
            let path = self.assets_root.join(&entry.path);
            if !path.exists() {
                log::warn!("Asset '{}' missing at {}", entry.key, path.display());
            }
        }

        let entry = manifest.tilemap().ok_or(ConfigError::MissingTilemap)?;
        let path = self.assets_root.join(&entry.path);
        let json = std::fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
        log::debug!("Resolved tilemap '{}' from {}", entry.key, path.display());
        MapMetadata::from_tiled_json(&json)
    }

    /// Preload, resolve and create
    pub fn start<S: Scene>(&self, scene: &mut S) -> Result<(), ConfigError> {
        let mut manifest = AssetManifest::default();
        scene.preload(&mut manifest);
        let map = self.resolve(&manifest)?;
        scene.create(&map)
    }

    /// Run `frames` updates, asking `input` for each frame's controls
    pub fn run<S, F>(&self, scene: &mut S, frames: u64, mut input: F) -> RunSummary
    where
        S: Scene,
        F: FnMut(u64) -> TickInput,
    {
        let mut summary = RunSummary::default();
        for frame in 0..frames {
            let Some(out) = scene.update(&input(frame), self.dt) else {
                break;
            };
            summary.frames += 1;
            for event in &out.events {
                summary.record(event);
            }
            summary.final_phase = Some(out.phase);
            summary.final_pos = out.player_pos;
        }
        summary
    }
}
