//! Game Events
//!
//! Events generated during simulation, queued on the session state and
//! drained into each tick's result. They exist for observers (renderer,
//! sound, replay tooling); the simulation never reads them back.

use serde::{Deserialize, Serialize};

use crate::game::mining::MineDirection;

/// Event payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A drill sequence began toward `target`.
    MiningStarted {
        /// Direction being drilled.
        direction: MineDirection,
        /// Grid cell that will convert when the drill completes.
        target: (i32, i32),
    },

    /// A cell converted `Earth -> Tunnel`.
    TileMined {
        /// Grid x of the converted cell.
        x: i32,
        /// Grid y of the converted cell.
        y: i32,
    },
}

/// A timestamped simulation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick the event occurred on.
    pub tick: u32,
    /// What happened.
    pub data: GameEventData,
}

impl GameEvent {
    /// A drill sequence began.
    pub fn mining_started(tick: u32, direction: MineDirection, target: (i32, i32)) -> Self {
        Self {
            tick,
            data: GameEventData::MiningStarted { direction, target },
        }
    }

    /// A cell converted to tunnel.
    pub fn tile_mined(tick: u32, x: i32, y: i32) -> Self {
        Self {
            tick,
            data: GameEventData::TileMined { x, y },
        }
    }
}
