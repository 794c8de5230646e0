//! Axis-aligned rectangles in world space
//!
//! World space is y-up: `min` is the bottom-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its bottom-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square of side `side` anchored at `min`
    pub fn square(min: Vec2, side: f32) -> Self {
        Self {
            min,
            size: Vec2::splat(side),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.bottom() < other.top()
            && self.top() > other.bottom()
    }

    /// Penetration depth along each axis (the smaller of the two edge overlaps).
    /// Only meaningful when the rectangles overlap.
    pub fn overlap_depth(&self, other: &Rect) -> Vec2 {
        Vec2::new(
            (self.right() - other.left()).min(other.right() - self.left()),
            (self.top() - other.bottom()).min(other.top() - self.bottom()),
        )
    }
}
