//! Edge-triggered input
//!
//! Keyboards report presses as events, mice and touch screens often report a
//! held/released level. Both are funnelled through [`ActionLatch`] so every
//! source yields at most one activation per press, and a press that arrives
//! between frames waits for the next frame instead of being lost.

use crate::sim::TickInput;

/// Converts a level signal into a single rising edge per press
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    high: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level; true only on a low-to-high transition
    pub fn update(&mut self, level: bool) -> bool {
        let rising = level && !self.high;
        self.high = level;
        rising
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

/// One input action: edge detection plus a latch held until consumed
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionLatch {
    trigger: EdgeTrigger,
    pending: bool,
}

impl ActionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level input (button held / touch down)
    pub fn set_level(&mut self, level: bool) {
        if self.trigger.update(level) {
            self.pending = true;
        }
    }

    /// Discrete press event (key down)
    pub fn press(&mut self) {
        self.pending = true;
    }

    /// Consume the latched press, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Latches for every action the game reads
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub fire: ActionLatch,
    pub pause: ActionLatch,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's edges, clearing the latches
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            fire: self.fire.take(),
            pause: self.pause.take(),
        }
    }

    /// Drop anything latched (e.g. the click that pressed a menu button)
    pub fn clear(&mut self) {
        self.fire.take();
        self.pause.take();
    }
}
