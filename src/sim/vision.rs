//! Camera follow and the darkness vision mask
//!
//! The darkness overlay is fixed to the screen, so the visible circle has to
//! be placed in screen space: the player's world position minus the camera
//! scroll. Recomputed every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A camera centered on its target, clamped to the map bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left corner of the view in world pixels
    pub scroll: Vec2,
    pub viewport: Vec2,
    /// Map size in world pixels
    pub bounds: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2, bounds: Vec2) -> Self {
        Self {
            scroll: Vec2::ZERO,
            viewport,
            bounds,
        }
    }

    /// Center on `target`; a map smaller than the viewport pins scroll at 0
    pub fn follow(&mut self, target: Vec2) {
        let max_scroll = (self.bounds - self.viewport).max(Vec2::ZERO);
        self.scroll = (target - self.viewport / 2.0).clamp(Vec2::ZERO, max_scroll);
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.scroll
    }
}

/// The visible circle cut out of the darkness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionMask {
    /// Screen-space center
    pub center: Vec2,
    pub radius: f32,
}

impl VisionMask {
    pub fn contains(&self, screen_point: Vec2) -> bool {
        screen_point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Circle at the player's screen position
#[inline]
pub fn compute_vision_mask(player_screen_pos: Vec2, radius: f32) -> VisionMask {
    VisionMask {
        center: player_screen_pos,
        radius,
    }
}

/// Full-screen darkness with a vision hole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DarknessOverlay {
    pub alpha: f32,
    pub size: Vec2,
}

impl Default for DarknessOverlay {
    fn default() -> Self {
        Self {
            alpha: DARKNESS_ALPHA,
            size: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        }
    }
}

impl DarknessOverlay {
    /// Opacity of the overlay at a screen pixel
    pub fn alpha_at(&self, screen_point: Vec2, mask: &VisionMask) -> f32 {
        if mask.contains(screen_point) {
            0.0
        } else {
            self.alpha
        }
    }

    /// Coarse text rendering of the overlay, one char per `cell` pixels
    pub fn sketch(&self, mask: &VisionMask, cell: f32) -> String {
        let cols = (self.size.x / cell).ceil() as usize;
        let rows = (self.size.y / cell).ceil() as usize;
        let mut out = String::with_capacity((cols + 1) * rows);
        for row in 0..rows {
            for col in 0..cols {
                let p = Vec2::new((col as f32 + 0.5) * cell, (row as f32 + 0.5) * cell);
                out.push(if self.alpha_at(p, mask) > 0.0 { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec2::new(800.0, 600.0), Vec2::new(1280.0, 960.0))
    }

    #[test]
    fn test_follow_centers_player() {
        let mut cam = camera();
        cam.follow(Vec2::new(640.0, 480.0));
        assert_eq!(cam.scroll, Vec2::new(240.0, 180.0));
        assert_eq!(cam.world_to_screen(Vec2::new(640.0, 480.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_follow_clamps_to_bounds() {
        let mut cam = camera();
        cam.follow(Vec2::new(10.0, 10.0));
        assert_eq!(cam.scroll, Vec2::ZERO);

        cam.follow(Vec2::new(1270.0, 950.0));
        assert_eq!(cam.scroll, Vec2::new(480.0, 360.0));
    }

    #[test]
    fn test_small_map_never_scrolls() {
        let mut cam = Camera::new(Vec2::new(800.0, 600.0), Vec2::new(320.0, 320.0));
        cam.follow(Vec2::new(300.0, 300.0));
        assert_eq!(cam.scroll, Vec2::ZERO);
    }

    #[test]
    fn test_mask_tracks_screen_position_not_world() {
        // Same screen position under different scroll offsets yields the same mask
        let mut cam = camera();
        cam.follow(Vec2::new(640.0, 480.0));
        let a = compute_vision_mask(cam.world_to_screen(Vec2::new(640.0, 480.0)), VISION_RADIUS);

        cam.follow(Vec2::new(700.0, 500.0));
        let b = compute_vision_mask(cam.world_to_screen(Vec2::new(700.0, 500.0)), VISION_RADIUS);

        assert_eq!(a.center, Vec2::new(400.0, 300.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_overlay_alpha() {
        let overlay = DarknessOverlay::default();
        let mask = compute_vision_mask(Vec2::new(400.0, 300.0), 100.0);
        assert_eq!(overlay.alpha_at(Vec2::new(400.0, 300.0), &mask), 0.0);
        assert_eq!(overlay.alpha_at(Vec2::new(499.0, 300.0), &mask), 0.0);
        assert_eq!(overlay.alpha_at(Vec2::new(0.0, 0.0), &mask), DARKNESS_ALPHA);
    }

    #[test]
    fn test_sketch_has_hole() {
        let overlay = DarknessOverlay::default();
        let mask = compute_vision_mask(Vec2::new(400.0, 300.0), 100.0);
        let text = overlay.sketch(&mask, 50.0);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0].len(), 16);
        assert!(lines[0].chars().all(|c| c == '#'));
        assert_eq!(lines[5].chars().nth(7), Some('.'));
    }
}
