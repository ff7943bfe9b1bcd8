//! Shared geometry for overlap tests
//!
//! Entities never inherit collision behaviour; each kind hands out a [`Body`]
//! and the free functions here do the math.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;

/// Position plus bounding size of any entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Axis-aligned overlap test.
    ///
    /// `self` extends from its position by its full size while `other` is
    /// centred on its position with half-extents. This is the rule the game
    /// has always used for shots against targets.
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        let half = other.size * 0.5;
        self.pos.x < other.pos.x + half.x
            && self.pos.x + self.size.x > other.pos.x - half.x
            && self.pos.y < other.pos.y + half.y
            && self.pos.y + self.size.y > other.pos.y - half.y
    }
}

/// True when two points are strictly closer than `reach`
#[inline]
pub fn within(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance_squared(b) < reach * reach
}

/// True when `dist(a, b)` lies strictly between `inner` and `outer`
#[inline]
pub fn in_band(a: Vec2, b: Vec2, inner: f32, outer: f32) -> bool {
    let d2 = a.distance_squared(b);
    d2 < outer * outer && d2 > inner * inner
}

/// Axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl FieldRect {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Rectangle the player is clamped into
    pub const PLAY_AREA: FieldRect = FieldRect::new(
        PLAYER_MARGIN,
        PLAYER_MARGIN,
        FIELD_WIDTH - PLAYER_MARGIN,
        FIELD_HEIGHT - PLAYER_MARGIN,
    );

    /// Enemy bullets survive only inside this rectangle
    pub const BULLET_BOUNDS: FieldRect = FieldRect::new(
        -BULLET_MARGIN,
        -BULLET_MARGIN,
        FIELD_WIDTH + BULLET_MARGIN,
        FIELD_HEIGHT + BULLET_MARGIN,
    );

    /// Strict containment (points on the border are outside)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}
