//! TickClock - Monotonic simulation tick counter

use std::sync::atomic::{AtomicI64, Ordering};

use toughwood_domain::model::aggro::Tick;

/// Shared tick counter
///
/// Advanced by the tick loop only; read by the stimulus path to stamp new
/// records. Never reset, so ticks keep increasing across stop/start.
#[derive(Debug, Default)]
pub struct TickClock {
    tick: AtomicI64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        self.tick.load(Ordering::Acquire)
    }

    /// Move to the next tick and return it
    pub fn advance(&self) -> Tick {
        self.tick.fetch_add(1, Ordering::AcqRel) + 1
    }
}
