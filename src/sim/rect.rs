//! Integer axis-aligned rectangles

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner
    #[inline]
    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn set_position(&mut self, pos: IVec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Move by `delta`, keeping the size.
    ///
    /// Nothing clamps the paddle, so a key held long enough walks it to the
    /// edge of the `i32` range. Coordinates saturate there.
    #[inline]
    pub fn translate(&mut self, delta: IVec2) {
        self.x = self.x.saturating_add(delta.x);
        self.y = self.y.saturating_add(delta.y);
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// A rectangle with no area never collides with anything
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Overlapping region of two rectangles, if it has positive area
    ///
    /// Rectangles that only share an edge do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }

        let x_min = self.x.max(other.x);
        let x_max = self.right().min(other.right());
        if x_max <= x_min {
            return None;
        }

        let y_min = self.y.max(other.y);
        let y_max = self.bottom().min(other.bottom());
        if y_max <= y_min {
            return None;
        }

        Some(Rect::new(
            x_min,
            y_min,
            x_max.saturating_sub(x_min),
            y_max.saturating_sub(y_min),
        ))
    }

    /// Bounding-box intersection test
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }
}
