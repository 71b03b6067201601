//! Axis-aligned rectangle geometry
//!
//! The playfield is a flat grid in screen coordinates (y grows downward),
//! so every collision shape is an axis-aligned rect:
//! - pos: top-left corner
//! - size: width/height extents (always positive)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width/height extents
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "degenerate rect {width}x{height}");
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Build a rect of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn centerx(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn centery(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// AABB overlap test. Touching edges count as overlap: the per-axis
    /// ranges intersect with inclusive boundaries, so two rects sharing an
    /// edge at zero width still collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    /// Check if a point lies inside the rect (inclusive edges)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Index of the first rect in `rects` (by sequence order) that overlaps
/// `rect`, or `None`. Ties are broken by list order alone, never by
/// geometric proximity; callers rely on this for deterministic hits.
pub fn first_intersection(rect: &Rect, rects: &[Rect]) -> Option<usize> {
    rects.iter().position(|r| rect.intersects(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.centerx(), 60.0);
        assert_eq!(r.centery(), 45.0);
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.left(), 40.0);
        assert_eq!(r.right(), 60.0);
        assert_eq!(r.top(), 45.0);
        assert_eq!(r.bottom(), 55.0);
    }

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_touching_edge_counts() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));

        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_intersects_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.5, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));

        let c = Rect::new(0.0, 30.0, 10.0, 10.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(5.0, 5.0)));
        assert!(r.contains_point(Vec2::new(10.0, 10.0)));
        assert!(!r.contains_point(Vec2::new(10.1, 5.0)));
    }

    #[test]
    fn test_first_intersection_order() {
        let probe = Rect::new(5.0, 5.0, 10.0, 10.0);
        // Both rects overlap the probe; the earlier index must win even
        // though the second is geometrically closer to the probe center.
        let rects = [
            Rect::new(0.0, 0.0, 6.0, 6.0),
            Rect::new(4.0, 4.0, 12.0, 12.0),
        ];
        assert_eq!(first_intersection(&probe, &rects), Some(0));
    }

    #[test]
    fn test_first_intersection_none() {
        let probe = Rect::new(100.0, 100.0, 5.0, 5.0);
        let rects = [Rect::new(0.0, 0.0, 6.0, 6.0)];
        assert_eq!(first_intersection(&probe, &rects), None);
        assert_eq!(first_intersection(&probe, &[]), None);
    }
}
