//! Scene lifecycle
//!
//! A host drives a scene through three phases:
//! 1. `preload` - declare the assets the scene needs
//! 2. `create`  - one-time setup from the resolved map
//! 3. `update`  - once per frame

use glam::Vec2;

use crate::consts::*;
use crate::error::ConfigError;
use crate::map::MapMetadata;
use crate::settings::Settings;
use crate::sim::{
    DarknessOverlay, SessionController, SessionEvent, SessionPhase, TickInput, VisionMask, World,
    tick,
};

/// What kind of file an asset key refers to
#[derive(Debug, Clone, PartialEq)]
pub enum AssetKind {
    /// Tiled JSON map
    TilemapJson,
    Image,
    Spritesheet { frame_width: f32, frame_height: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub key: String,
    /// Path relative to the assets root
    pub path: String,
    pub kind: AssetKind,
}

/// Assets requested during preload
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    pub entries: Vec<AssetEntry>,
}

impl AssetManifest {
    pub fn tilemap_json(&mut self, key: &str, path: &str) {
        self.push(key, path, AssetKind::TilemapJson);
    }

    pub fn image(&mut self, key: &str, path: &str) {
        self.push(key, path, AssetKind::Image);
    }

    pub fn spritesheet(&mut self, key: &str, path: &str, frame_width: f32, frame_height: f32) {
        self.push(
            key,
            path,
            AssetKind::Spritesheet {
                frame_width,
                frame_height,
            },
        );
    }

    fn push(&mut self, key: &str, path: &str, kind: AssetKind) {
        self.entries.push(AssetEntry {
            key: key.to_string(),
            path: path.to_string(),
            kind,
        });
    }

    pub fn get(&self, key: &str) -> Option<&AssetEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// First tilemap entry, if any
    pub fn tilemap(&self) -> Option<&AssetEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == AssetKind::TilemapJson)
    }
}

/// Commands for the host after one frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub player_pos: Vec2,
    pub player_vel: Vec2,
    pub mask: VisionMask,
    pub phase: SessionPhase,
    /// Collectible spawns/removals and relocations since the last frame
    pub events: Vec<SessionEvent>,
}

/// Three-phase scene contract
pub trait Scene {
    /// Declare assets to resolve before `create`
    fn preload(&mut self, manifest: &mut AssetManifest);

    /// One-time setup. An error aborts the scene.
    fn create(&mut self, map: &MapMetadata) -> Result<(), ConfigError>;

    /// Advance one frame; `None` until `create` has succeeded
    fn update(&mut self, input: &TickInput, dt: f32) -> Option<FrameOutput>;
}

/// The potion-hunting scene
#[derive(Debug)]
pub struct GameScene {
    settings: Settings,
    overlay: DarknessOverlay,
    world: Option<World>,
}

impl GameScene {
    pub const MAP_KEY: &'static str = "mapa";

    pub fn new(settings: Settings) -> Self {
        let overlay = DarknessOverlay {
            alpha: settings.darkness_alpha,
            size: settings.viewport(),
            ..DarknessOverlay::default()
        };
        Self {
            settings,
            overlay,
            world: None,
        }
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn overlay(&self) -> &DarknessOverlay {
        &self.overlay
    }
}

impl Scene for GameScene {
    fn preload(&mut self, manifest: &mut AssetManifest) {
        manifest.tilemap_json(Self::MAP_KEY, "tilemap/mapa.json");
        manifest.image("tiles", "atlas/albañil.png");
        manifest.image("star", "atlas/star.png");
        manifest.spritesheet("pj", "atlas/pj.png", PLAYER_FRAME_WIDTH, PLAYER_FRAME_HEIGHT);
        manifest.image("pocion", "atlas/pocion.jpg");
    }

    fn create(&mut self, map: &MapMetadata) -> Result<(), ConfigError> {
        let schema = &self.settings.schema;

        let spawns = map.spawn_points(schema)?;
        let layout = map.collectible_layout(schema)?;
        if layout.is_empty() {
            return Err(ConfigError::NoCollectibles {
                object_name: schema.collectible_name.clone(),
            });
        }
        let reset_regions = map.tile_regions(&schema.reset_layer)?;
        if reset_regions.is_empty() {
            log::warn!(
                "Reset layer '{}' has no tiles; the cycle can never restart",
                schema.reset_layer
            );
        }

        let mut session = SessionController::initialize(
            spawns,
            self.settings.initial_spawn,
            self.settings.seed,
        )?;
        session.spawn_collectibles(&layout);

        log::info!(
            "Scene created: {} spawns, {} potions, {} reset cells",
            session.spawn_points().len(),
            layout.len(),
            reset_regions.len()
        );

        self.world = Some(World::new(
            session,
            reset_regions,
            map.size_in_pixels(),
            &self.settings,
        ));
        Ok(())
    }

    fn update(&mut self, input: &TickInput, dt: f32) -> Option<FrameOutput> {
        let world = self.world.as_mut()?;
        tick(world, input, dt);

        let player = world.session.player();
        Some(FrameOutput {
            player_pos: player.pos,
            player_vel: player.vel,
            mask: world.mask,
            phase: world.session.phase(),
            events: world.session.drain_events(),
        })
    }
}
