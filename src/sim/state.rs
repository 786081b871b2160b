//! Session state and core entity types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::overlap::Rect;
use crate::consts::*;

/// A place the player may appear at scene start or after a reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

impl SpawnPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Exact coordinate match; spawns are only excluded when the player
    /// stands precisely on them
    pub fn is_at(&self, pos: Vec2) -> bool {
        self.x == pos.x && self.y == pos.y
    }
}

/// A potion waiting to be picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    /// Bottom-left anchor in world pixels
    pub pos: Vec2,
    pub active: bool,
}

impl Collectible {
    pub fn body(&self, size: f32) -> Rect {
        Rect::bottom_left(self.pos, Vec2::splat(size))
    }
}

/// The player's kinematic state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sprite center in world pixels
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Player {
    pub fn at(pos: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO }
    }

    /// Collision body: the spritesheet frame at spawn scale, centered
    pub fn body(&self) -> Rect {
        Rect::centered(
            self.pos,
            Vec2::new(PLAYER_FRAME_WIDTH, PLAYER_FRAME_HEIGHT) * PLAYER_SCALE,
        )
    }

    /// Teleport and stop
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// Where the session is in its collect / reset cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Potions remain on the map
    Collecting,
    /// Every potion is gone; waiting for the player to step on the reset floor
    AllCollected,
    /// Relocation in progress (only observable from inside a reset)
    Resetting,
}

/// Flags driving the one-shot reset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub all_collected: bool,
    /// Set when a relocation fires; cleared again when the next batch is emptied
    pub reset_armed: bool,
    /// Completed collect-and-reset cycles
    pub cycles: u32,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match (self.all_collected, self.reset_armed) {
            (false, _) => SessionPhase::Collecting,
            (true, false) => SessionPhase::AllCollected,
            (true, true) => SessionPhase::Resetting,
        }
    }
}

/// Outputs for the host engine, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    CollectibleSpawned { id: u32, pos: Vec2 },
    CollectibleCollected { id: u32, remaining: usize },
    AllCollected,
    PlayerRelocated { from: Vec2, to: Vec2 },
    ResetSkipped,
}
