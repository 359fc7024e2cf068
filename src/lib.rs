//! # Tunneler Core
//!
//! Deterministic simulation core for a 2D tile-based side-scrolling mining
//! game: a player sprite moves across a grid of sky/earth/tunnel tiles under
//! gravity and directional input, and a guarded, timed mining action erodes
//! earth tiles into tunnels.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       TUNNELER CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q16.16 fixed-point pixels + tuning        │
//! │  ├── vec2.rs     - 2D pixel vector                           │
//! │  ├── geom.rs     - Integer-pixel span/box tests              │
//! │  └── digest.rs   - State digests for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── input.rs    - Key frames and input tapes                │
//! │  ├── map.rs      - Tile grid accessor                        │
//! │  ├── player.rs   - Player entity state                       │
//! │  ├── collision.rs- Directional movement resolver             │
//! │  ├── mining.rs   - Drill state machine                       │
//! │  ├── state.rs    - Session state                             │
//! │  ├── tick.rs     - Simulation loop + replay                  │
//! │  └── events.rs   - Events for observers                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering, camera/viewport math, keyboard wiring and asset loading are
//! host concerns: the host feeds one [`game::InputFrame`] per frame into
//! [`game::tick()`] and draws from the player's observable state
//! (position, dimensions, current tile, mining flag).
//!
//! ## Determinism Guarantee
//!
//! The whole crate is deterministic:
//! - No floating-point arithmetic in simulation logic
//! - All timing measured on a logical tick counter - no wall clock
//! - Cooldowns are stored deadlines, drills are explicit step counters
//!
//! Given the same map, spawn and input tape, the simulation produces
//! identical results - and identical [`game::GameState::digest`] values -
//! on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::fixed::{Fixed, FIXED_HALF, FIXED_ONE, FIXED_SCALE};
pub use crate::core::vec2::PixelVec;
pub use crate::game::{
    tick, Direction, GameEvent, GameState, InputFrame, InputTape, MineDirection, PlayerState,
    SimConfig, TileMap, TileType,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
