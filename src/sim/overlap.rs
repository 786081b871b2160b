//! Axis-aligned overlap tests
//!
//! Bodies in the scene are all rectangles: the player's scaled sprite frame,
//! each potion, and each cell of the reset floor. Overlap only reports
//! contact; nothing here pushes bodies apart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle of `size` centered on `center` (sprite origin 0.5, 0.5)
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    /// Rectangle of `size` whose bottom-left corner sits at `anchor`
    /// (sprite origin 0, 1, as Tiled places tile objects)
    pub fn bottom_left(anchor: Vec2, size: Vec2) -> Self {
        Self::new(
            Vec2::new(anchor.x, anchor.y - size.y),
            Vec2::new(anchor.x + size.x, anchor.y),
        )
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True when the two rectangles share interior area.
    /// Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// First rectangle in `regions` overlapping `body`, if any
pub fn first_overlap<'a>(body: &Rect, regions: &'a [Rect]) -> Option<&'a Rect> {
    regions.iter().find(|r| r.overlaps(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::centered(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        let b = Rect::centered(Vec2::new(18.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let far = Rect::centered(Vec2::new(40.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::new(32.0, 32.0));
        let b = Rect::new(Vec2::new(32.0, 0.0), Vec2::new(64.0, 32.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_bottom_left_anchor() {
        let r = Rect::bottom_left(Vec2::new(100.0, 200.0), Vec2::new(12.0, 12.0));
        assert_eq!(r.min, Vec2::new(100.0, 188.0));
        assert_eq!(r.max, Vec2::new(112.0, 200.0));
        assert_eq!(r.center(), Vec2::new(106.0, 194.0));
    }

    #[test]
    fn test_first_overlap() {
        let cells = [
            Rect::new(Vec2::ZERO, Vec2::new(32.0, 32.0)),
            Rect::new(Vec2::new(32.0, 0.0), Vec2::new(64.0, 32.0)),
        ];
        let body = Rect::centered(Vec2::new(40.0, 16.0), Vec2::new(4.0, 4.0));
        assert_eq!(first_overlap(&body, &cells), Some(&cells[1]));

        let outside = Rect::centered(Vec2::new(100.0, 100.0), Vec2::new(4.0, 4.0));
        assert!(first_overlap(&outside, &cells).is_none());
    }
}
