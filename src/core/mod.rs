//! Core deterministic primitives.
//!
//! Fixed-point pixel math, integer-pixel geometry tests, and state
//! digesting. Everything here is pure and platform-independent.

pub mod digest;
pub mod fixed;
pub mod geom;
pub mod vec2;

// Re-export core types
pub use digest::{digest_hex, StateDigest, StateHasher};
pub use fixed::{Fixed, FIXED_HALF, FIXED_ONE, FIXED_SCALE};
pub use geom::PixelBox;
pub use vec2::PixelVec;
