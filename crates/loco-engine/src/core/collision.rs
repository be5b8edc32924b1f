//! Inset axis-aligned overlap tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shrinkage applied to a sprite's bounds to get its hit box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Inset {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Inset {
    pub const ZERO: Inset = Inset { top: 0.0, bottom: 0.0, left: 0.0, right: 0.0 };

    pub const fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self { top, bottom, left, right }
    }

    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// An inset never removes more than the sprite has on either axis.
    pub fn fits(&self, size: Vec2) -> bool {
        self.left >= 0.0
            && self.right >= 0.0
            && self.top >= 0.0
            && self.bottom >= 0.0
            && self.left + self.right <= size.x
            && self.top + self.bottom <= size.y
    }
}

/// Effective collision rectangle of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl HitBox {
    /// Hit box of a sprite at `pos` (top-left) with `size`, shrunk by `inset`.
    pub fn new(pos: Vec2, size: Vec2, inset: Inset) -> Self {
        Self {
            left: pos.x + inset.left,
            top: pos.y + inset.top,
            right: pos.x + size.x - inset.right,
            bottom: pos.y + size.y - inset.bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Strict overlap on both axes; touching edges do not collide.
    pub fn overlaps(&self, other: &HitBox) -> bool {
        self.right > other.left
            && self.bottom > other.top
            && self.left < other.right
            && self.top < other.bottom
    }
}

/// Anything that occupies an inset box in the world.
pub trait Collider {
    fn hit_box(&self) -> HitBox;

    fn is_colliding(&self, other: &dyn Collider) -> bool {
        self.hit_box().overlaps(&other.hit_box())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hb(x: f32, y: f32, w: f32, h: f32, inset: Inset) -> HitBox {
        HitBox::new(Vec2::new(x, y), Vec2::new(w, h), inset)
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (hb(0.0, 0.0, 100.0, 100.0, Inset::uniform(35.0)), hb(40.0, 40.0, 50.0, 50.0, Inset::ZERO)),
            (hb(0.0, 170.0, 120.0, 250.0, Inset::new(110.0, 10.0, 25.0, 25.0)), hb(90.0, 340.0, 80.0, 80.0, Inset::new(5.0, 5.0, 25.0, 25.0))),
            (hb(0.0, 0.0, 10.0, 10.0, Inset::ZERO), hb(500.0, 0.0, 10.0, 10.0, Inset::ZERO)),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = hb(0.0, 0.0, 10.0, 10.0, Inset::ZERO);
        let b = hb(10.0, 0.0, 10.0, 10.0, Inset::ZERO);
        assert!(!a.overlaps(&b));
        let c = hb(9.5, 0.0, 10.0, 10.0, Inset::ZERO);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn inset_shrinks_the_box() {
        // Sprites overlap by 20 units, but insets of 15 on each facing side remove it.
        let a = hb(0.0, 0.0, 100.0, 100.0, Inset::new(0.0, 0.0, 0.0, 15.0));
        let b = hb(80.0, 0.0, 100.0, 100.0, Inset::new(0.0, 0.0, 15.0, 0.0));
        assert!(!a.overlaps(&b));
        assert_eq!(a.width(), 85.0);
    }

    #[test]
    fn inset_fit_check() {
        assert!(Inset::uniform(35.0).fits(Vec2::new(100.0, 100.0)));
        assert!(!Inset::uniform(60.0).fits(Vec2::new(100.0, 100.0)));
        assert!(!Inset::new(-1.0, 0.0, 0.0, 0.0).fits(Vec2::splat(10.0)));
    }
}
