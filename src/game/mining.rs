//! Mining State Machine
//!
//! The timed action that erodes one earth tile into a tunnel. A successful
//! `start_mining` records a [`MiningProgress`] on the player; the tick
//! driver then advances the drill one pixel per sub-step until the sprite
//! has crossed a full tile, at which point the destination cell flips
//! `Earth -> Tunnel` and the cooldown is re-armed.
//!
//! There is no cancellation: once started, a drill always runs to
//! completion. Re-entrant starts are rejected by the in-flight guard, which
//! is also what suspends normal input processing for the entity.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::fixed::{from_px, PLAYER_WIDTH, TILE_HEIGHT, TILE_WIDTH};
use crate::game::collision::{resolve_move, Direction};
use crate::game::events::GameEvent;
use crate::game::map::{TileMap, TileType};
use crate::game::player::PlayerState;

/// Directions a tile can be mined in. Mining never goes up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MineDirection {
    /// Erode the tile below.
    Down,
    /// Erode the tile to the left.
    Left,
    /// Erode the tile to the right.
    Right,
}

impl MineDirection {
    /// The movement direction driving the drill.
    pub const fn as_direction(self) -> Direction {
        match self {
            MineDirection::Down => Direction::Down,
            MineDirection::Left => Direction::Left,
            MineDirection::Right => Direction::Right,
        }
    }

    /// Grid offset from the current tile to the mining target.
    pub const fn target_offset(self) -> (i32, i32) {
        match self {
            MineDirection::Down => (0, 1),
            MineDirection::Left => (-1, 0),
            MineDirection::Right => (1, 0),
        }
    }

    /// Drill length in 1-px sub-steps: one tile along the movement axis.
    pub const fn drill_steps(self) -> i32 {
        match self {
            MineDirection::Down => TILE_HEIGHT,
            MineDirection::Left | MineDirection::Right => TILE_WIDTH,
        }
    }
}

/// An in-flight drill sequence, advanced by [`step_mining`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningProgress {
    /// Direction being drilled.
    pub direction: MineDirection,
    /// 1-px sub-steps left before the tile converts.
    pub steps_remaining: i32,
    /// Tick at which the next sub-step may run.
    pub next_step_tick: u32,
}

/// Mining pace and cooldown, in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineConfig {
    /// Ticks between drill sub-steps. 1 tick at 60 Hz matches the source's
    /// ~20 ms drilling pace.
    pub step_interval_ticks: u32,
    /// Post-movement cooldown before mining is allowed again. 6 ticks at
    /// 60 Hz is the ~100 ms block from the source.
    pub cooldown_ticks: u32,
}

impl Default for MineConfig {
    fn default() -> Self {
        Self {
            step_interval_ticks: 1,
            cooldown_ticks: 6,
        }
    }
}

/// Check every mining guard for `direction` at tick `now`.
///
/// Refreshes the player's derived current tile first, then requires, in
/// order: no cooldown and no drill in flight; the sprite fully inside its
/// tile (no straddling); resting on earth at a row-aligned position (no
/// airborne mining); for horizontal directions, the sprite flush against the
/// boundary being drilled; and an in-bounds `Earth` target. Out-of-bounds
/// targets are `None` and can never be earth, which is the whole of the map
/// boundary rule.
pub fn can_mine(player: &mut PlayerState, map: &TileMap, direction: MineDirection, now: u32) -> bool {
    player.recompute_current_tile();
    let (tx, ty) = player.current_tile;

    if player.mining_blocked(now) || player.is_mining() {
        return false;
    }
    if !player.fully_inside_current_tile() {
        return false;
    }
    if !player.is_grounded(map) {
        return false;
    }

    let flush = match direction {
        MineDirection::Down => true,
        MineDirection::Left => player.position.x == from_px(tx * TILE_WIDTH),
        MineDirection::Right => {
            player.position.x + from_px(PLAYER_WIDTH) == from_px((tx + 1) * TILE_WIDTH)
        }
    };
    if !flush {
        return false;
    }

    let (dx, dy) = direction.target_offset();
    map.get(tx + dx, ty + dy) == Some(TileType::Earth)
}

/// Begin a drill sequence if every guard holds; an ineligible attempt is a
/// silent no-op returning `None`.
pub fn start_mining(
    player: &mut PlayerState,
    map: &TileMap,
    direction: MineDirection,
    now: u32,
    config: &MineConfig,
) -> Option<GameEvent> {
    if !can_mine(player, map, direction, now) {
        return None;
    }

    let (tx, ty) = player.current_tile;
    let (dx, dy) = direction.target_offset();
    let target = (tx + dx, ty + dy);

    player.mining = Some(MiningProgress {
        direction,
        steps_remaining: direction.drill_steps(),
        next_step_tick: now.saturating_add(config.step_interval_ticks),
    });
    player.arm_mine_cooldown(now, config.cooldown_ticks);

    debug!("mining started: {:?} into tile ({}, {})", direction, target.0, target.1);
    Some(GameEvent::mining_started(now, direction, target))
}

/// Advance an in-flight drill by at most one sub-step.
///
/// Does nothing when no drill is active or its next sub-step is not due yet.
/// The 1-px advance goes through the collision resolver (the drill
/// exemption lets it pass the earth being mined); on the final sub-step the
/// now-current tile converts to a tunnel and the cooldown is re-armed.
pub fn step_mining(
    player: &mut PlayerState,
    map: &mut TileMap,
    now: u32,
    config: &MineConfig,
) -> Option<GameEvent> {
    let progress = player.mining?;
    if now < progress.next_step_tick {
        return None;
    }

    resolve_move(
        player,
        map,
        progress.direction.as_direction(),
        from_px(1),
        now,
        config.cooldown_ticks,
    );

    let steps_remaining = progress.steps_remaining - 1;
    if steps_remaining > 0 {
        trace!("drill sub-step: {} remaining", steps_remaining);
        player.mining = Some(MiningProgress {
            steps_remaining,
            next_step_tick: now.saturating_add(config.step_interval_ticks),
            ..progress
        });
        return None;
    }

    // Drilled a full tile: the sprite now sits in the target cell.
    player.recompute_current_tile();
    let (tx, ty) = player.current_tile;
    map.set(tx, ty, TileType::Tunnel);
    player.mining = None;
    player.arm_mine_cooldown(now, config.cooldown_ticks);

    debug!("tile mined at ({}, {})", tx, ty);
    Some(GameEvent::tile_mined(now, tx, ty))
}
