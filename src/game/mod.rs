//! Game Logic Module
//!
//! All simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `input`: Key frames and delta-compressed input tapes
//! - `map`: Tile types and the bounds-checked grid accessor
//! - `player`: Player entity state and derived current tile
//! - `collision`: Directional movement resolver
//! - `mining`: Guarded, step-driven drill state machine
//! - `state`: Session state (tick counter + map + player)
//! - `tick`: Per-tick driver and replay harness
//! - `events`: Simulation events for observers

pub mod collision;
pub mod events;
pub mod input;
pub mod map;
pub mod mining;
pub mod player;
pub mod state;
pub mod tick;

// Re-export key types
pub use collision::{resolve_move, Direction, MoveOutcome};
pub use events::{GameEvent, GameEventData};
pub use input::{InputFrame, InputTape};
pub use map::{MapError, TileMap, TileType};
pub use mining::{can_mine, MineConfig, MineDirection, MiningProgress};
pub use player::PlayerState;
pub use state::GameState;
pub use tick::{replay, tick, SimConfig, TickResult};
