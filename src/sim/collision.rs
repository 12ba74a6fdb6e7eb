//! Axis-aligned bounding-box collision
//!
//! Every entity pair in the game (player/obstacle, bullet/obstacle,
//! player/power-up, spawn rejection) goes through `Rect::overlaps`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Anything with a bounding box
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

/// True if `rect` overlaps any entity in `others`
pub fn overlaps_any<T: Bounded>(rect: &Rect, others: &[T]) -> bool {
    others.iter().any(|o| rect.overlaps(&o.bounds()))
}
