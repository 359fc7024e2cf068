//! Session State
//!
//! The owning container for one game session: the externally supplied map,
//! the single player, and the logical tick counter every deadline in the
//! crate is measured against. Mutated only through
//! [`crate::game::tick::tick`].

use serde::{Deserialize, Serialize};

use crate::core::digest::{StateDigest, StateHasher};
use crate::game::events::GameEvent;
use crate::game::map::TileMap;
use crate::game::player::PlayerState;

/// Complete state of a running session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Logical tick counter, advanced once per [`crate::game::tick::tick`].
    pub tick: u32,

    /// The session's tile grid. Mutated only by completed drills.
    pub map: TileMap,

    /// The player entity.
    pub player: PlayerState,

    /// Events queued this tick, drained into the tick result.
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session over an externally supplied map, with the player
    /// resting at the origin of `spawn_tile`.
    pub fn new(map: TileMap, spawn_tile: (i32, i32)) -> Self {
        Self {
            tick: 0,
            map,
            player: PlayerState::at_tile(spawn_tile.0, spawn_tile.1),
            events: Vec::new(),
        }
    }

    /// Queue an event for this tick's result.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all queued events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deterministic digest of the full simulation state.
    ///
    /// Field order is fixed: tick, player (position, tile, drill state,
    /// cooldown deadline), then map dimensions and cells row-major. Two runs
    /// of the same inputs produce equal digests.
    pub fn digest(&self) -> StateDigest {
        let mut hasher = StateHasher::for_game_state();

        hasher.update_u32(self.tick);

        hasher.update_vec(self.player.position);
        hasher.update_i32(self.player.current_tile.0);
        hasher.update_i32(self.player.current_tile.1);
        match self.player.mining {
            Some(progress) => {
                hasher.update_bool(true);
                hasher.update_u8(progress.direction as u8);
                hasher.update_i32(progress.steps_remaining);
                hasher.update_u32(progress.next_step_tick);
            }
            None => hasher.update_bool(false),
        }
        hasher.update_u32(self.player.mine_ready_tick);

        hasher.update_u32(self.map.width() as u32);
        hasher.update_u32(self.map.height() as u32);
        for tile in self.map.tiles() {
            hasher.update_u8(tile as u8);
        }

        hasher.finalize()
    }
}
