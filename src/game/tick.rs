//! Simulation Tick
//!
//! One call per host frame. The driver advances the logical clock, then
//! either steps an in-flight drill (input is suspended while mining) or
//! applies gravity and the sampled key frame in the source's frame order:
//! gravity, horizontal (mine if eligible, else walk), fly, mine down.

use crate::core::fixed::{Fixed, FLY_VELOCITY, GRAVITY_VELOCITY};
use crate::game::collision::{resolve_move, Direction};
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, InputTape};
use crate::game::mining::{start_mining, step_mining, MineConfig, MineDirection};
use crate::game::state::GameState;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick.
    pub events: Vec<GameEvent>,
}

/// Tuning for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Downward pull per non-flying tick, fixed px.
    pub gravity_velocity: Fixed,
    /// Upward speed while the up key is held, fixed px. Walking speed comes
    /// from the player's own `speed` stat.
    pub fly_velocity: Fixed,
    /// Mining pace and cooldown.
    pub mine: MineConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity_velocity: GRAVITY_VELOCITY,
            fly_velocity: FLY_VELOCITY,
            mine: MineConfig::default(),
        }
    }
}

/// Run one simulation tick.
///
/// Deterministic: same state, same frame, same config - same result. While
/// a drill is in flight only the drill advances; the player's other input
/// is ignored until it completes.
pub fn tick(state: &mut GameState, input: &InputFrame, config: &SimConfig) -> TickResult {
    state.tick += 1;
    let now = state.tick;
    let cooldown = config.mine.cooldown_ticks;

    if state.player.is_mining() {
        if let Some(event) = step_mining(&mut state.player, &mut state.map, now, &config.mine) {
            state.push_event(event);
        }
        return TickResult {
            events: state.take_events(),
        };
    }

    // Gravity, unless the player is flying this tick.
    if !input.up() {
        resolve_move(
            &mut state.player,
            &state.map,
            Direction::Down,
            config.gravity_velocity,
            now,
            cooldown,
        );
    }

    // Horizontal: opposing keys cancel out. An eligible mine preempts the
    // walk and suspends the rest of this tick's input.
    let walk = state.player.speed;
    if input.left() && !input.right() {
        if let Some(event) =
            start_mining(&mut state.player, &state.map, MineDirection::Left, now, &config.mine)
        {
            state.push_event(event);
            return TickResult {
                events: state.take_events(),
            };
        }
        resolve_move(&mut state.player, &state.map, Direction::Left, walk, now, cooldown);
    } else if input.right() && !input.left() {
        if let Some(event) =
            start_mining(&mut state.player, &state.map, MineDirection::Right, now, &config.mine)
        {
            state.push_event(event);
            return TickResult {
                events: state.take_events(),
            };
        }
        resolve_move(&mut state.player, &state.map, Direction::Right, walk, now, cooldown);
    }

    if input.up() {
        resolve_move(
            &mut state.player,
            &state.map,
            Direction::Up,
            config.fly_velocity,
            now,
            cooldown,
        );
    }

    if input.down() {
        if let Some(event) =
            start_mining(&mut state.player, &state.map, MineDirection::Down, now, &config.mine)
        {
            state.push_event(event);
        }
    }

    TickResult {
        events: state.take_events(),
    }
}

/// Re-run a recorded input tape against an initial state.
///
/// Returns the final state and every event generated. Comparing
/// [`GameState::digest`] of two replays of the same tape verifies
/// determinism end to end.
pub fn replay(initial: GameState, tape: &InputTape, config: &SimConfig) -> (GameState, Vec<GameEvent>) {
    let mut state = initial;
    let mut all_events = Vec::new();

    for (_, frame) in tape.replay_iter() {
        let result = tick(&mut state, &frame, config);
        all_events.extend(result.events);
    }

    (state, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::core::fixed::{
        from_px, to_fixed, PLAYER_HEIGHT, PLAYER_WIDTH, TILE_HEIGHT, TILE_WIDTH, WALK_VELOCITY,
    };
    use crate::core::vec2::PixelVec;
    use crate::game::events::GameEventData;
    use crate::game::map::{TileMap, TileType};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    /// 10x10 all earth, sky across the top row - the reference scenario.
    fn scenario_state() -> GameState {
        let mut map = TileMap::new(10, 10, TileType::Earth);
        map.fill_row(0, TileType::Sky);
        GameState::new(map, (1, 1))
    }

    fn open_state() -> GameState {
        GameState::new(TileMap::new(10, 10, TileType::Sky), (1, 1))
    }

    fn frame(left: bool, right: bool, up: bool, down: bool) -> InputFrame {
        let mut f = InputFrame::new();
        f.set_left(left);
        f.set_right(right);
        f.set_up(up);
        f.set_down(down);
        f
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut state = open_state();
        let config = SimConfig::default();

        tick(&mut state, &InputFrame::new(), &config);
        assert_eq!(state.tick, 1);
        assert_eq!(state.player.position, PixelVec::new(from_px(40), from_px(40) + to_fixed(5.0)));
    }

    #[test]
    fn test_up_key_flies_without_gravity() {
        let mut state = open_state();
        let config = SimConfig::default();

        tick(&mut state, &frame(false, false, true, false), &config);
        assert_eq!(state.player.position.y, from_px(40) - config.fly_velocity);
    }

    #[test]
    fn test_walk_uses_player_speed() {
        let mut state = open_state();
        let config = SimConfig::default();

        tick(&mut state, &frame(false, true, false, false), &config);
        assert_eq!(state.player.position.x, from_px(40) + WALK_VELOCITY);

        tick(&mut state, &frame(true, false, false, false), &config);
        assert_eq!(state.player.position.x, from_px(40));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut state = open_state();
        let config = SimConfig::default();

        tick(&mut state, &frame(true, true, false, false), &config);
        assert_eq!(state.player.position.x, from_px(40));
    }

    #[test]
    fn test_resting_then_mine_down_scenario() {
        init_tracing();
        let mut state = scenario_state();
        let config = SimConfig::default();

        // Resting on earth: gravity is blocked, the snap holds the position.
        tick(&mut state, &InputFrame::new(), &config);
        assert_eq!(state.player.position, PixelVec::from_px(TILE_WIDTH, TILE_HEIGHT));

        // Hold the down key: the drill starts and runs to completion.
        let down = frame(false, false, false, true);
        let mut saw_start = false;
        let mut saw_mined = false;
        for _ in 0..50 {
            let result = tick(&mut state, &down, &config);
            for event in &result.events {
                match event.data {
                    GameEventData::MiningStarted { target, .. } => {
                        assert_eq!(target, (1, 2));
                        saw_start = true;
                    }
                    GameEventData::TileMined { x, y } => {
                        assert_eq!((x, y), (1, 2));
                        saw_mined = true;
                    }
                }
            }
            if saw_mined {
                break;
            }
        }

        assert!(saw_start);
        assert!(saw_mined);
        assert!(!state.player.is_mining());
        assert_eq!(state.map.get(1, 2), Some(TileType::Tunnel));
        assert_eq!(state.player.position, PixelVec::from_px(TILE_WIDTH, 2 * TILE_HEIGHT));
        assert_eq!(state.player.current_tile, (1, 2));
    }

    #[test]
    fn test_input_suspended_while_mining() {
        let mut state = scenario_state();
        let config = SimConfig::default();
        let down = frame(false, false, false, true);

        tick(&mut state, &down, &config);
        assert!(state.player.is_mining());

        // Held movement keys do nothing while the drill runs.
        let x_before = state.player.position.x;
        tick(&mut state, &frame(false, true, true, false), &config);
        assert!(state.player.is_mining());
        assert_eq!(state.player.position.x, x_before);
    }

    #[test]
    fn test_cooldown_blocks_mining_after_walk() {
        let mut state = scenario_state();
        state.map.fill_row(1, TileType::Sky); // open corridor on row 1
        let config = SimConfig::default();

        // One walking tick arms the cooldown (deadline = tick 1 + 6).
        tick(&mut state, &frame(false, true, false, false), &config);
        assert!(state.player.mining_blocked(state.tick));

        // Down key is refused until the deadline passes.
        let down = frame(false, false, false, true);
        tick(&mut state, &down, &config);
        assert!(!state.player.is_mining());

        for _ in 0..4 {
            tick(&mut state, &InputFrame::new(), &config);
        }
        assert_eq!(state.tick, 6);

        tick(&mut state, &down, &config);
        assert!(state.player.is_mining());
    }

    #[test]
    fn test_replay_matches_live_run() {
        let config = SimConfig::default();

        // Record a session: dig down, then carve a side tunnel.
        let mut tape = InputTape::new();
        let mut live = scenario_state();
        for t in 0..220u32 {
            let f = match t {
                0..=59 => frame(false, false, false, true),
                60..=79 => InputFrame::new(),
                80..=199 => frame(false, true, false, false),
                _ => InputFrame::new(),
            };
            tape.record(t, f);
            tick(&mut live, &f, &config);
        }

        let (replayed, events) = replay(scenario_state(), &tape, &config);

        assert_eq!(live.digest(), replayed.digest());
        assert_eq!(live.player.position, replayed.player.position);
        assert!(events.iter().any(|e| matches!(e.data, GameEventData::TileMined { .. })));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let config = SimConfig::default();
        let mut tape = InputTape::new();
        for t in 0..120u32 {
            // Alternate digging and walking pressure.
            let f = if t % 30 < 15 {
                frame(false, false, false, true)
            } else {
                frame(true, false, false, false)
            };
            tape.record(t, f);
        }

        let (a, events_a) = replay(scenario_state(), &tape, &config);
        let (b, events_b) = replay(scenario_state(), &tape, &config);

        assert_eq!(a.digest(), b.digest());
        assert_eq!(events_a, events_b);
    }

    proptest! {
        /// Bounds invariant: no input sequence pushes the player outside the
        /// map's pixel bounds.
        #[test]
        fn prop_position_stays_in_bounds(flag_seq in proptest::collection::vec(0u8..16, 1..250)) {
            let mut state = scenario_state();
            let config = SimConfig::default();

            for flags in flag_seq {
                tick(&mut state, &InputFrame { flags }, &config);
                let x = state.player.position.x;
                let y = state.player.position.y;
                prop_assert!(x >= 0);
                prop_assert!(x <= from_px(10 * TILE_WIDTH - PLAYER_WIDTH));
                prop_assert!(y >= 0);
                prop_assert!(y <= from_px(10 * TILE_HEIGHT - PLAYER_HEIGHT));
            }
        }

        /// Mining only ever converts earth: the earth count never grows and
        /// the tunnel count never shrinks.
        #[test]
        fn prop_map_mutation_is_monotonic(flag_seq in proptest::collection::vec(0u8..16, 1..250)) {
            let mut state = scenario_state();
            let config = SimConfig::default();
            let mut earth = state.map.count(TileType::Earth);
            let mut tunnels = state.map.count(TileType::Tunnel);

            for flags in flag_seq {
                tick(&mut state, &InputFrame { flags }, &config);
                let earth_now = state.map.count(TileType::Earth);
                let tunnels_now = state.map.count(TileType::Tunnel);
                prop_assert!(earth_now <= earth);
                prop_assert!(tunnels_now >= tunnels);
                prop_assert_eq!(earth - earth_now, tunnels_now - tunnels);
                earth = earth_now;
                tunnels = tunnels_now;
            }
        }
    }
}
