//! Circle vs axis-aligned rectangle overlap
//!
//! Pure functions only. Everything the motion integrator knows about walls
//! comes through `circle_intersects_rect`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Point on or inside the rectangle closest to `p`
    ///
    /// Each axis is clamped independently, so a point inside the rectangle
    /// maps to itself.
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        let max = self.max();
        let x = if p.x < self.x {
            self.x
        } else if p.x > max.x {
            max.x
        } else {
            p.x
        };
        let y = if p.y < self.y {
            self.y
        } else if p.y > max.y {
            max.y
        } else {
            p.y
        };
        Vec2::new(x, y)
    }
}

/// A circle, used for the player's collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// True when the circle touches or overlaps the rectangle
///
/// Touching counts: a distance exactly equal to the radius is a hit.
#[inline]
pub fn circle_intersects_rect(circle: Circle, rect: &Rect) -> bool {
    let nearest = rect.nearest_point(circle.center);
    circle.center.distance(nearest) <= circle.radius
}
