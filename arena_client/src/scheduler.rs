//! Fixed-timestep accumulator.
//!
//! Variable frame time drains into whole simulation steps, never a
//! fractional one, so the simulation rate stays aligned with the
//! network tick regardless of render frame rate. Catch-up after a
//! stall is capped per call and the excess backlog discarded.

use tracing::warn;

/// Accumulates real time and grants whole fixed steps.
#[derive(Debug)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_ticks: u32,
}

impl FixedTimestep {
    pub fn new(tick_hz: u32, max_ticks_per_frame: u32) -> Self {
        Self {
            step: 1.0 / tick_hz.max(1) as f32,
            accumulator: 0.0,
            max_ticks: max_ticks_per_frame.max(1),
        }
    }

    pub fn step_secs(&self) -> f32 {
        self.step
    }

    /// Feeds `dt` seconds of real time and returns how many fixed
    /// steps to simulate now. Backlog beyond the per-call cap is
    /// discarded; the sub-step remainder is kept.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if self.accumulator >= self.step {
            let dropped = self.accumulator - self.accumulator % self.step;
            warn!(
                dropped_secs = dropped,
                "simulation fell behind, discarding backlog"
            );
            self.accumulator %= self.step;
        }
        ticks
    }
}
