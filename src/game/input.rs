//! Input Capture
//!
//! The four movement keys, packed into a flag byte and sampled once per
//! tick. The host's keyboard layer flips individual flags on key-down /
//! key-up; the tick driver only ever reads a whole frame.
//!
//! [`InputTape`] is a delta-compressed recording of frames - only ticks
//! where the input changed are stored - used to replay a session
//! deterministically.

use serde::{Deserialize, Serialize};

/// Key state for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrame {
    /// Packed key flags:
    /// - Bit 0: left arrow held
    /// - Bit 1: right arrow held
    /// - Bit 2: up arrow held
    /// - Bit 3: down arrow held
    /// - Bits 4-7: reserved
    pub flags: u8,
}

impl InputFrame {
    /// Left arrow flag bit.
    pub const FLAG_LEFT: u8 = 0x01;

    /// Right arrow flag bit.
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Up arrow flag bit.
    pub const FLAG_UP: u8 = 0x04;

    /// Down arrow flag bit.
    pub const FLAG_DOWN: u8 = 0x08;

    /// Create a frame with no keys held.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Whether the left arrow is held.
    #[inline]
    pub fn left(&self) -> bool {
        self.flags & Self::FLAG_LEFT != 0
    }

    /// Whether the right arrow is held.
    #[inline]
    pub fn right(&self) -> bool {
        self.flags & Self::FLAG_RIGHT != 0
    }

    /// Whether the up arrow is held.
    #[inline]
    pub fn up(&self) -> bool {
        self.flags & Self::FLAG_UP != 0
    }

    /// Whether the down arrow is held.
    #[inline]
    pub fn down(&self) -> bool {
        self.flags & Self::FLAG_DOWN != 0
    }

    /// Key-down / key-up update for the left arrow.
    #[inline]
    pub fn set_left(&mut self, held: bool) {
        self.set_flag(Self::FLAG_LEFT, held);
    }

    /// Key-down / key-up update for the right arrow.
    #[inline]
    pub fn set_right(&mut self, held: bool) {
        self.set_flag(Self::FLAG_RIGHT, held);
    }

    /// Key-down / key-up update for the up arrow.
    #[inline]
    pub fn set_up(&mut self, held: bool) {
        self.set_flag(Self::FLAG_UP, held);
    }

    /// Key-down / key-up update for the down arrow.
    #[inline]
    pub fn set_down(&mut self, held: bool) {
        self.set_flag(Self::FLAG_DOWN, held);
    }

    /// Whether no keys are held.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    #[inline]
    fn set_flag(&mut self, flag: u8, held: bool) {
        if held {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}

/// One stored change of input state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick at which this frame took effect.
    pub tick: u32,
    /// The new frame.
    pub frame: InputFrame,
}

/// Delta-compressed recording of a session's input.
///
/// Holding a key for a second is one delta, not sixty. A tape replayed
/// against the same initial state reproduces the session exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTape {
    /// Last tick covered by the recording.
    pub end_tick: u32,

    /// Frames at the ticks they changed, ascending by tick.
    deltas: Vec<InputDelta>,

    /// Last recorded frame, for delta comparison.
    #[serde(skip)]
    last_frame: InputFrame,
}

impl InputTape {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the frame sampled at `tick`. Only stored if it differs from
    /// the previously recorded frame.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.end_tick = tick;
        if frame != self.last_frame || self.deltas.is_empty() {
            self.deltas.push(InputDelta { tick, frame });
            self.last_frame = frame;
        }
    }

    /// The frame in effect at `tick` (idle before the first delta).
    pub fn frame_at(&self, tick: u32) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// Number of stored deltas.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Iterate `(tick, frame)` from tick 0 through `end_tick`.
    pub fn replay_iter(&self) -> impl Iterator<Item = (u32, InputFrame)> + '_ {
        (0..=self.end_tick).map(|tick| (tick, self.frame_at(tick)))
    }
}
