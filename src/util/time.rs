//! Time utilities for game simulation

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Tick rate configuration
pub const SIMULATION_TPS: u32 = 30; // 30 ticks per second
pub const SNAPSHOT_TPS: u32 = 10; // 10 HUD snapshots per second
pub const TICK_DURATION_MILLIS: u64 = 1000 / SIMULATION_TPS as u64;

/// Calculate delta time for movement integration (in seconds)
pub fn tick_delta() -> f32 {
    1.0 / SIMULATION_TPS as f32
}

/// Logical simulation clock, advanced once per tick.
///
/// All cooldowns, fire windows and projectile lifetimes are measured against
/// this clock rather than wall time, so a world stepped manually in tests
/// behaves exactly like one driven by the session loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    now_ms: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self { now_ms: 0 }
    }

    /// Current simulation time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Advance the clock by one fixed tick
    pub fn advance_tick(&mut self) {
        self.now_ms += TICK_DURATION_MILLIS;
    }

    /// Advance the clock by an arbitrary amount (tests)
    pub fn advance_ms(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut clock = SimClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.advance_tick();
        clock.advance_tick();
        assert_eq!(clock.now_ms(), 2 * TICK_DURATION_MILLIS);
    }
}
