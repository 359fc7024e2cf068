//! Player Entity State
//!
//! Position, derived current tile, and the two mining gate flags. Movement
//! decisions live in [`crate::game::collision`] and the drill sequence in
//! [`crate::game::mining`]; both borrow the map explicitly and mutate this
//! state.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{
    fixed_rem, from_px, Fixed, DEFAULT_SPEED, PLAYER_HEIGHT, PLAYER_WIDTH, TILE_HEIGHT, TILE_WIDTH,
};
use crate::core::geom::{tile_box, PixelBox};
use crate::core::vec2::PixelVec;
use crate::game::map::{TileMap, TileType};
use crate::game::mining::MiningProgress;

/// The single player entity of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left corner of the sprite in fixed-point pixels. Always inside
    /// the map's pixel bounds.
    pub position: PixelVec,

    /// Derived tile the player is considered "in" (see
    /// [`PlayerState::recompute_current_tile`]). Never written directly by
    /// movement; always recomputed from `position`.
    pub current_tile: (i32, i32),

    /// In-flight drill sequence, if any. `Some` is the `isMining` state.
    pub mining: Option<MiningProgress>,

    /// Deadline tick before which mining is blocked (post-movement
    /// cooldown). Re-armed by overwriting; compared against the session tick
    /// counter.
    pub mine_ready_tick: u32,

    /// Movement speed stat in fixed px/tick.
    pub speed: Fixed,

    /// Acceleration stat. Reserved for later tuning, currently unused.
    pub acceleration: Fixed,
}

impl PlayerState {
    /// Create a player resting at the origin of grid cell `(tx, ty)`.
    pub fn at_tile(tx: i32, ty: i32) -> Self {
        let mut player = Self {
            position: PixelVec::from_px(tx * TILE_WIDTH, ty * TILE_HEIGHT),
            current_tile: (tx, ty),
            mining: None,
            mine_ready_tick: 0,
            speed: DEFAULT_SPEED,
            acceleration: 0,
        };
        player.recompute_current_tile();
        player
    }

    /// Sprite size in whole pixels, for the render contract.
    #[inline]
    pub const fn dimensions(&self) -> (i32, i32) {
        (PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Whether a drill sequence is in flight.
    #[inline]
    pub fn is_mining(&self) -> bool {
        self.mining.is_some()
    }

    /// Whether the post-movement cooldown still blocks mining at `now`.
    #[inline]
    pub fn mining_blocked(&self, now: u32) -> bool {
        now < self.mine_ready_tick
    }

    /// Arm (or re-arm) the mining cooldown. Overwriting the deadline is the
    /// cancellation of any earlier release.
    #[inline]
    pub fn arm_mine_cooldown(&mut self, now: u32, cooldown_ticks: u32) {
        self.mine_ready_tick = now.saturating_add(cooldown_ticks);
    }

    /// The sprite's integer-pixel box at the current position.
    #[inline]
    pub fn sprite_box(&self) -> PixelBox {
        PixelBox::of_sprite(self.position)
    }

    /// Recompute `current_tile` from `position`.
    ///
    /// Per-axis rule: the tile containing the sprite's midpoint. An
    /// undersized sprite therefore keeps its tile until more than half of it
    /// has crossed the boundary, instead of flipping the moment one pixel
    /// enters the next cell.
    pub fn recompute_current_tile(&mut self) {
        self.current_tile = current_tile_for(self.position);
    }

    /// Full containment of the sprite box in its current tile, on both axes
    /// (stricter than the overlap test - no straddling at all).
    pub fn fully_inside_current_tile(&self) -> bool {
        let (tx, ty) = self.current_tile;
        tile_box(tx, ty).contains(&self.sprite_box())
    }

    /// Resting at ground level: exactly row-aligned (the position the
    /// blocked-fall snap produces) with earth directly underneath. Callers
    /// recompute the current tile first.
    pub fn is_grounded(&self, map: &TileMap) -> bool {
        let (tx, ty) = self.current_tile;
        fixed_rem(self.position.y, from_px(TILE_HEIGHT)) == 0
            && map.get(tx, ty + 1) == Some(TileType::Earth)
    }
}

/// Midpoint-rule tile coordinates for a sprite at `position`.
pub fn current_tile_for(position: PixelVec) -> (i32, i32) {
    let center_x = position.x + from_px(PLAYER_WIDTH) / 2;
    let center_y = position.y + from_px(PLAYER_HEIGHT) / 2;
    (
        center_x.div_euclid(from_px(TILE_WIDTH)),
        center_y.div_euclid(from_px(TILE_HEIGHT)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_at_tile_is_aligned() {
        let player = PlayerState::at_tile(2, 3);
        assert_eq!(player.position, PixelVec::from_px(80, 120));
        assert_eq!(player.current_tile, (2, 3));
        assert!(player.fully_inside_current_tile());
    }

    #[test]
    fn test_current_tile_midpoint_rule() {
        // Flush at the origin of tile (1, 1).
        assert_eq!(current_tile_for(PixelVec::from_px(40, 40)), (1, 1));

        // A few pixels into the next column: midpoint still in tile 1.
        assert_eq!(current_tile_for(PixelVec::from_px(55, 40)), (1, 1));

        // Midpoint crosses x = 80 once x > 80 - 18; tile flips to 2.
        assert_eq!(current_tile_for(PixelVec::from_px(63, 40)), (2, 1));

        // Sub-pixel positions use the exact fixed-point midpoint.
        let just_before = PixelVec::new(to_fixed(61.99), from_px(40));
        assert_eq!(current_tile_for(just_before), (1, 1));
        let at_flip = PixelVec::new(to_fixed(62.0), from_px(40));
        assert_eq!(current_tile_for(at_flip), (2, 1));
    }

    #[test]
    fn test_mining_cooldown_deadline() {
        let mut player = PlayerState::at_tile(0, 0);
        assert!(!player.mining_blocked(0));

        player.arm_mine_cooldown(10, 6);
        assert!(player.mining_blocked(10));
        assert!(player.mining_blocked(15));
        assert!(!player.mining_blocked(16));

        // Re-arming overwrites the deadline.
        player.arm_mine_cooldown(12, 6);
        assert!(player.mining_blocked(16));
        assert!(!player.mining_blocked(18));
    }

    #[test]
    fn test_grounded() {
        let mut map = TileMap::new(5, 5, TileType::Earth);
        map.fill_row(0, TileType::Sky);

        let mut player = PlayerState::at_tile(1, 0);
        assert!(player.is_grounded(&map)); // earth below row 0

        player.position.y += to_fixed(1.5);
        player.recompute_current_tile();
        assert!(!player.is_grounded(&map)); // airborne: not row-aligned

        // Row-aligned but over a tunnel: not grounded.
        map.set(2, 1, TileType::Tunnel);
        let player = PlayerState::at_tile(2, 0);
        assert!(!player.is_grounded(&map));
    }

    #[test]
    fn test_fully_inside_current_tile() {
        let mut player = PlayerState::at_tile(1, 1);
        assert!(player.fully_inside_current_tile());

        // Any offset beyond the 4 px slack straddles two columns.
        player.position.x += from_px(5);
        player.recompute_current_tile();
        assert!(!player.fully_inside_current_tile());

        // Within the slack the sprite still fits.
        let mut player = PlayerState::at_tile(1, 1);
        player.position.x += from_px(4);
        player.recompute_current_tile();
        assert!(player.fully_inside_current_tile());
    }
}
