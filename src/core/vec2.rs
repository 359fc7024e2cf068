//! Fixed-Point Pixel Vector
//!
//! 2D point in screen-space pixels (x right, y down, origin at the map's
//! top-left corner). Components are Q16.16 fixed-point.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fixed::{from_px, to_float, to_px_floor, Fixed};

/// 2D pixel position with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelVec {
    /// X component in Q16.16 pixels, growing rightward.
    pub x: Fixed,
    /// Y component in Q16.16 pixels, growing downward.
    pub y: Fixed,
}

impl PixelVec {
    /// Origin (map top-left corner).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create from whole-pixel components.
    #[inline]
    pub const fn from_px(x: i32, y: i32) -> Self {
        Self {
            x: from_px(x),
            y: from_px(y),
        }
    }

    /// Floor both components to whole pixels.
    #[inline]
    pub const fn floor_px(self) -> (i32, i32) {
        (to_px_floor(self.x), to_px_floor(self.y))
    }

    /// Convert to float components for rendering.
    #[inline]
    pub fn to_float(self) -> (f32, f32) {
        (to_float(self.x), to_float(self.y))
    }
}

impl fmt::Debug for PixelVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_float();
        write!(f, "PixelVec({x:.3}, {y:.3})")
    }
}

impl fmt::Display for PixelVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_float();
        write!(f, "({x:.3}, {y:.3})")
    }
}
