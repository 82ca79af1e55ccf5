//! Axis-aligned collision geometry
//!
//! Walls, body boxes, and probe boxes are all axis-aligned rectangles. Line of
//! sight is approximated by sampling probe boxes along a segment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LOS_PROBE_SIZE, LOS_SAMPLES};

/// An axis-aligned rectangle anchored at its top-left corner
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

    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Top-left corner
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Inclusive AABB test: rectangles sharing an edge count as overlapping
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x <= b.right() && b.x <= a.right() && a.y <= b.bottom() && b.y <= a.bottom()
}

/// True if `rect` touches any wall
pub fn hits_any_wall(rect: &Rect, walls: &[Rect]) -> bool {
    walls.iter().any(|wall| rects_overlap(rect, wall))
}

/// Coarse visibility check between two points.
///
/// Samples `LOS_SAMPLES` evenly spaced points from `from` toward `to` (the end
/// point itself is not sampled) and fails on the first probe box that touches
/// a wall. Walls thinner than the sample spacing can slip between samples on
/// long segments.
pub fn has_line_of_sight(from: Vec2, to: Vec2, walls: &[Rect]) -> bool {
    (0..LOS_SAMPLES).all(|i| {
        let t = i as f32 / LOS_SAMPLES as f32;
        let probe = Rect::centered(from.lerp(to, t), LOS_PROBE_SIZE);
        !hits_any_wall(&probe, walls)
    })
}
