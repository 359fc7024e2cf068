//! Integer Pixel Geometry
//!
//! 1D span and axis-aligned box tests used by the collision resolver and the
//! mining guards. Everything here works on whole pixels: fixed-point
//! positions are floored once at the boundary and all intervals are
//! half-open `[start, end)`, so two boxes that merely touch along an edge do
//! not overlap. That single convention decides every collision edge in the
//! crate.

use super::fixed::{PLAYER_HEIGHT, PLAYER_WIDTH, TILE_HEIGHT, TILE_WIDTH};
use super::vec2::PixelVec;

/// Non-empty intersection of two half-open 1D spans.
#[inline]
pub fn span_overlaps(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Full containment of `[inner_start, inner_end)` in `[outer_start, outer_end)`.
#[inline]
pub fn span_contains(outer_start: i32, outer_end: i32, inner_start: i32, inner_end: i32) -> bool {
    outer_start <= inner_start && inner_end <= outer_end
}

/// Axis-aligned box in whole pixels, half-open on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBox {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl PixelBox {
    /// Create from edges.
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The player sprite's box at a fixed-point position, floored to whole
    /// pixels.
    #[inline]
    pub const fn of_sprite(position: PixelVec) -> Self {
        let (x, y) = position.floor_px();
        Self {
            x0: x,
            y0: y,
            x1: x + PLAYER_WIDTH,
            y1: y + PLAYER_HEIGHT,
        }
    }

    /// Boxes overlap when both axes intersect.
    #[inline]
    pub fn overlaps(&self, other: &PixelBox) -> bool {
        span_overlaps(self.x0, self.x1, other.x0, other.x1)
            && span_overlaps(self.y0, self.y1, other.y0, other.y1)
    }

    /// `other` lies fully inside this box on both axes.
    #[inline]
    pub fn contains(&self, other: &PixelBox) -> bool {
        span_contains(self.x0, self.x1, other.x0, other.x1)
            && span_contains(self.y0, self.y1, other.y0, other.y1)
    }
}

/// The pixel box covered by the tile at grid cell `(tx, ty)`.
#[inline]
pub const fn tile_box(tx: i32, ty: i32) -> PixelBox {
    PixelBox {
        x0: tx * TILE_WIDTH,
        y0: ty * TILE_HEIGHT,
        x1: (tx + 1) * TILE_WIDTH,
        y1: (ty + 1) * TILE_HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_overlaps() {
        assert!(span_overlaps(0, 10, 5, 15));
        assert!(span_overlaps(5, 15, 0, 10));
        assert!(!span_overlaps(0, 10, 10, 20)); // touching is not overlap
        assert!(!span_overlaps(0, 10, 15, 20));
    }

    #[test]
    fn test_span_contains() {
        assert!(span_contains(0, 40, 0, 36));
        assert!(span_contains(0, 40, 4, 40));
        assert!(!span_contains(0, 40, 5, 41));
        assert!(!span_contains(0, 40, -1, 30));
    }

    #[test]
    fn test_sprite_box() {
        let sprite = PixelBox::of_sprite(PixelVec::from_px(40, 80));
        assert_eq!(sprite, PixelBox::new(40, 80, 40 + PLAYER_WIDTH, 80 + PLAYER_HEIGHT));
    }

    #[test]
    fn test_tile_box_overlap() {
        let tile = tile_box(1, 1);
        assert_eq!(tile, PixelBox::new(40, 40, 80, 80));

        // Sprite flush above the tile touches but does not overlap.
        let resting = PixelBox::of_sprite(PixelVec::from_px(40, 0));
        assert!(!resting.overlaps(&tile));

        // One pixel lower and it does.
        let sunk = PixelBox::of_sprite(PixelVec::from_px(40, 5));
        assert!(sunk.overlaps(&tile));
    }

    #[test]
    fn test_tile_box_contains_sprite() {
        let tile = tile_box(2, 3);
        let inside = PixelBox::of_sprite(PixelVec::from_px(80, 120));
        assert!(tile.contains(&inside));

        let straddling = PixelBox::of_sprite(PixelVec::from_px(79, 120));
        assert!(!tile.contains(&straddling));
    }
}
