//! Q16.16 Fixed-Point Pixel Arithmetic
//!
//! Deterministic fixed-point math for the simulation. All positions and
//! velocities are Q16.16 pixels - no floats in simulation logic.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 px (approx)                │
//! │  Precision: 1/65536 px per step                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! 32k pixels of range covers an 800-tile-wide map at 40 px/tile, and the
//! sub-pixel fraction carries fractional walk speeds across ticks without
//! drift.

/// Q16.16 fixed-point pixel value stored as i32.
/// 16 bits integer pixels, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 px in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 px in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

// =============================================================================
// TILE & SPRITE GEOMETRY (integer pixels)
// =============================================================================

/// Tile width in whole pixels.
pub const TILE_WIDTH: i32 = 40;

/// Tile height in whole pixels.
pub const TILE_HEIGHT: i32 = 40;

/// Player sprite width in whole pixels. Strictly smaller than a tile.
pub const PLAYER_WIDTH: i32 = 36;

/// Player sprite height in whole pixels. Strictly smaller than a tile.
///
/// The per-axis slack (`TILE_* - PLAYER_*` = 4 px) stays below
/// `GRAVITY_VELOCITY`, so a blocked fall re-snaps within a single tick and
/// resting on earth is stable.
pub const PLAYER_HEIGHT: i32 = 36;

// =============================================================================
// MOVEMENT TUNING (Fixed px per tick)
// =============================================================================

/// Downward pull applied every non-mining tick the up key is released.
pub const GRAVITY_VELOCITY: Fixed = to_fixed(5.0);

/// Horizontal walking speed.
pub const WALK_VELOCITY: Fixed = to_fixed(2.36);

/// Upward flying speed while the up key is held.
pub const FLY_VELOCITY: Fixed = to_fixed(2.36);

/// Default player speed stat. Matches [`WALK_VELOCITY`]; kept on the player
/// so per-entity tuning stays possible.
pub const DEFAULT_SPEED: Fixed = WALK_VELOCITY;

// =============================================================================
// CORE OPERATIONS (all deterministic)
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// Only use in const context or initialization, never per tick.
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/rendering.
///
/// Only for visual output - the result never feeds back into simulation.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Convert whole pixels to fixed-point.
#[inline]
pub const fn from_px(px: i32) -> Fixed {
    px << FIXED_SCALE
}

/// Floor a fixed-point value to whole pixels.
///
/// Arithmetic shift floors toward negative infinity, so `-0.5 px` floors to
/// `-1` - the convention every integer-pixel overlap test in the crate uses.
#[inline]
pub const fn to_px_floor(v: Fixed) -> i32 {
    v >> FIXED_SCALE
}

/// Euclidean remainder of two fixed-point values.
///
/// Always non-negative for positive `b`; `fixed_rem(v, from_px(TILE_HEIGHT))
/// == 0` is the tile-row alignment test.
#[inline]
pub fn fixed_rem(a: Fixed, b: Fixed) -> Fixed {
    if b == 0 {
        return 0;
    }
    a.rem_euclid(b)
}

/// Minimum of two fixed-point values.
#[inline]
pub fn fixed_min(a: Fixed, b: Fixed) -> Fixed {
    if a < b { a } else { b }
}

/// Maximum of two fixed-point values.
#[inline]
pub fn fixed_max(a: Fixed, b: Fixed) -> Fixed {
    if a > b { a } else { b }
}

/// Clamp a fixed-point value to `[min, max]`.
#[inline]
pub fn fixed_clamp(value: Fixed, min: Fixed, max: Fixed) -> Fixed {
    fixed_max(min, fixed_min(max, value))
}

// =============================================================================
// TESTS
// =============================================================================
