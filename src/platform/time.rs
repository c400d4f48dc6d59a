//! Frame pacing
//!
//! The browser drives frames through `requestAnimationFrame`, so it needs an
//! accumulator that turns wall time into whole ticks. The native host owns
//! its loop and sleeps until the next tick instead.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add elapsed seconds and return how many ticks are due
    ///
    /// Long stalls (tab in background) are capped so the simulation never
    /// tries to catch up more than `max_substeps` ticks in one frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Blocking tick pacer for the native loop
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct TickClock {
    period: std::time::Duration,
    next: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl TickClock {
    pub fn new(ticks_per_second: u32) -> Self {
        let period = std::time::Duration::from_secs_f64(1.0 / ticks_per_second.max(1) as f64);
        Self {
            period,
            next: std::time::Instant::now() + period,
        }
    }

    /// Sleep until the next tick is due. A late caller is not made to catch
    /// up; the schedule restarts from now.
    pub fn wait(&mut self) {
        let now = std::time::Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_accumulates() {
        let mut step = FixedStep::new(0.01, 8);
        assert_eq!(step.advance(0.005), 0);
        assert_eq!(step.advance(0.006), 1);
        assert_eq!(step.advance(0.025), 2);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut step = FixedStep::new(1.0 / 60.0, 4);
        assert_eq!(step.advance(0.1), 4);
        // Backlog was dropped, not carried into the next frame
        assert!(step.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(-1.0), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_tick_clock_paces() {
        let mut clock = TickClock::new(200);
        let start = std::time::Instant::now();
        for _ in 0..4 {
            clock.wait();
        }
        assert!(start.elapsed() >= std::time::Duration::from_millis(15));
    }
}
