//! Movement Resolver
//!
//! Axis-aligned tile collision for the player. Each call resolves one
//! directional move: recompute the current tile, form a clamped candidate
//! position, test the candidate sprite box against the five neighboring
//! tiles the direction can reach, then commit, block-and-snap, or report the
//! move as a zero-distance no-op.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{
    fixed_clamp, from_px, Fixed, PLAYER_HEIGHT, PLAYER_WIDTH, TILE_HEIGHT, TILE_WIDTH,
};
use crate::core::geom::{tile_box, PixelBox};
use crate::core::vec2::PixelVec;
use crate::game::map::{TileMap, TileType};
use crate::game::player::PlayerState;

/// A movement direction. Velocity is always non-negative; the direction
/// carries the sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward the top of the map (flying).
    Up,
    /// Toward the bottom of the map (gravity, drilling).
    Down,
    /// Toward the left edge.
    Left,
    /// Toward the right edge.
    Right,
}

impl Direction {
    /// The five neighbor tiles a move in this direction has to examine: the
    /// tile directly ahead, the two perpendicular neighbors, and the two
    /// forward diagonals. Offsets are relative to the current tile.
    pub const fn neighbor_offsets(self) -> [(i32, i32); 5] {
        match self {
            Direction::Up => [(0, -1), (-1, 0), (1, 0), (-1, -1), (1, -1)],
            Direction::Down => [(0, 1), (-1, 0), (1, 0), (-1, 1), (1, 1)],
            Direction::Left => [(-1, 0), (0, -1), (0, 1), (-1, -1), (-1, 1)],
            Direction::Right => [(1, 0), (0, -1), (0, 1), (1, -1), (1, 1)],
        }
    }
}

/// What a [`resolve_move`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The candidate position was committed.
    Moved,
    /// Earth blocked the move; the position was snapped to the relevant
    /// tile edge.
    Blocked,
    /// The move was legal but clamping left the position where it was
    /// (already at a map edge).
    Unchanged,
}

/// Largest legal position on each axis: the origin of the last tile plus the
/// slack of the undersized sprite, so the sprite's far edge meets the map's
/// far edge.
fn position_bounds(map: &TileMap) -> (Fixed, Fixed) {
    let max_x = TILE_WIDTH * (map.width() as i32 - 1) + (TILE_WIDTH - PLAYER_WIDTH);
    let max_y = TILE_HEIGHT * (map.height() as i32 - 1) + (TILE_HEIGHT - PLAYER_HEIGHT);
    (from_px(max_x), from_px(max_y))
}

/// Resolve one directional move of `velocity` fixed px.
///
/// While a drill sequence is in flight, `Down`, `Left` and `Right` ignore
/// earth blocking so the drill can advance through the tile being mined;
/// `Up` never does. Blocked moves snap to the tile edge facing the obstacle
/// and never arm the mining cooldown; committed moves that actually changed
/// the position arm it (`mine_ready_tick = now + cooldown_ticks`,
/// overwriting any earlier deadline).
pub fn resolve_move(
    player: &mut PlayerState,
    map: &TileMap,
    direction: Direction,
    velocity: Fixed,
    now: u32,
    cooldown_ticks: u32,
) -> MoveOutcome {
    // Position may have changed since the last decision (a drill sub-step,
    // a snap): the tile is always re-derived first.
    player.recompute_current_tile();
    let (tx, ty) = player.current_tile;

    let (max_x, max_y) = position_bounds(map);
    let mut candidate = player.position;
    match direction {
        Direction::Up => candidate.y -= velocity,
        Direction::Down => candidate.y += velocity,
        Direction::Left => candidate.x -= velocity,
        Direction::Right => candidate.x += velocity,
    }
    candidate.x = fixed_clamp(candidate.x, 0, max_x);
    candidate.y = fixed_clamp(candidate.y, 0, max_y);

    let drill_exempt = player.is_mining() && direction != Direction::Up;
    if !drill_exempt && hits_earth(map, (tx, ty), direction, candidate) {
        snap_to_edge(player, direction);
        player.recompute_current_tile();
        return MoveOutcome::Blocked;
    }

    if candidate == player.position {
        return MoveOutcome::Unchanged;
    }

    player.position = candidate;
    player.recompute_current_tile();
    player.arm_mine_cooldown(now, cooldown_ticks);
    MoveOutcome::Moved
}

/// Does the candidate sprite box overlap any earth tile among the
/// direction's five neighbors? Out-of-bounds neighbors are `None` and fail
/// open (never block).
fn hits_earth(
    map: &TileMap,
    current_tile: (i32, i32),
    direction: Direction,
    candidate: PixelVec,
) -> bool {
    let sprite = PixelBox::of_sprite(candidate);
    direction.neighbor_offsets().iter().any(|&(dx, dy)| {
        let (nx, ny) = (current_tile.0 + dx, current_tile.1 + dy);
        map.get(nx, ny) == Some(TileType::Earth) && sprite.overlaps(&tile_box(nx, ny))
    })
}

/// Direction-specific snap after a blocked move. `Up` does not snap.
fn snap_to_edge(player: &mut PlayerState, direction: Direction) {
    let (tx, ty) = player.current_tile;
    match direction {
        Direction::Down => player.position.y = from_px(ty * TILE_HEIGHT),
        Direction::Left => player.position.x = from_px(tx * TILE_WIDTH),
        Direction::Right => {
            player.position.x = from_px((tx + 1) * TILE_WIDTH - PLAYER_WIDTH);
        }
        Direction::Up => {}
    }
}
