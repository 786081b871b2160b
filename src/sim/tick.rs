//! Per-frame simulation step
//!
//! Order within a frame matters: potion pickups are dispatched before the
//! reset floor is checked, so grabbing the last potion while already
//! standing on the floor resets in the same frame.

use glam::Vec2;

use super::overlap::{Rect, first_overlap};
use super::session::SessionController;
use super::state::SessionPhase;
use super::vision::{Camera, VisionMask, compute_vision_mask};
use crate::settings::Settings;

/// Autopilot stops steering on an axis once within this many pixels
const AUTOPILOT_DEADZONE: f32 = 2.0;

/// Directional input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Demo mode - steer toward the next goal automatically
    pub autopilot: bool,
}

/// Everything the per-frame step reads and writes
#[derive(Debug, Clone)]
pub struct World {
    pub session: SessionController,
    pub camera: Camera,
    /// One rectangle per reset floor cell
    pub reset_regions: Vec<Rect>,
    pub mask: VisionMask,
    pub speed: f32,
    pub vision_radius: f32,
    pub collectible_size: f32,
    pub frame: u64,
}

impl World {
    pub fn new(
        session: SessionController,
        reset_regions: Vec<Rect>,
        map_size: Vec2,
        settings: &Settings,
    ) -> Self {
        let mut camera = Camera::new(settings.viewport(), map_size);
        camera.follow(session.player().pos);
        let mask = compute_vision_mask(
            camera.world_to_screen(session.player().pos),
            settings.vision_radius,
        );
        Self {
            session,
            camera,
            reset_regions,
            mask,
            speed: settings.player_speed,
            vision_radius: settings.vision_radius,
            collectible_size: settings.collectible_size,
            frame: 0,
        }
    }
}

/// Velocity from held directions. Left beats right and up beats down;
/// the axes are independent so diagonals move faster.
pub fn input_velocity(input: &TickInput, speed: f32) -> Vec2 {
    let x = if input.left {
        -speed
    } else if input.right {
        speed
    } else {
        0.0
    };
    let y = if input.up {
        -speed
    } else if input.down {
        speed
    } else {
        0.0
    };
    Vec2::new(x, y)
}

/// Directions toward the nearest goal: an active potion, or the reset floor
/// once every potion is gone
pub fn autopilot_input(world: &World) -> TickInput {
    let pos = world.session.player().pos;
    let target = match world.session.phase() {
        SessionPhase::Collecting => nearest_to(
            pos,
            world
                .session
                .active_collectibles()
                .map(|c| c.body(world.collectible_size).center()),
        ),
        SessionPhase::AllCollected | SessionPhase::Resetting => {
            nearest_to(pos, world.reset_regions.iter().map(|r| r.center()))
        }
    };

    let Some(target) = target else {
        return TickInput::default();
    };
    let delta = target - pos;
    TickInput {
        left: delta.x < -AUTOPILOT_DEADZONE,
        right: delta.x > AUTOPILOT_DEADZONE,
        up: delta.y < -AUTOPILOT_DEADZONE,
        down: delta.y > AUTOPILOT_DEADZONE,
        autopilot: true,
    }
}

fn nearest_to(pos: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| {
        a.distance_squared(pos)
            .partial_cmp(&b.distance_squared(pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    world.frame += 1;

    let input = if input.autopilot {
        autopilot_input(world)
    } else {
        input.clone()
    };

    // Movement
    let player = world.session.player_mut();
    player.vel = input_velocity(&input, world.speed);
    player.pos += player.vel * dt;

    // Potions first
    let body = world.session.player().body();
    let touched: Vec<u32> = world
        .session
        .active_collectibles()
        .filter(|c| c.body(world.collectible_size).overlaps(&body))
        .map(|c| c.id)
        .collect();
    for id in touched {
        world.session.on_collectible_touched(id);
    }

    // Then the reset floor
    if first_overlap(&body, &world.reset_regions).is_some() {
        world.session.on_reset_trigger_touched();
    }

    // Camera and vision follow wherever the player ended up
    let pos = world.session.player().pos;
    world.camera.follow(pos);
    world.mask = compute_vision_mask(world.camera.world_to_screen(pos), world.vision_radius);
}
