use std::time::{Duration, Instant};

use log::debug;

use crate::config::PROFILE_REPORT_WINDOW_MS;

/// Timing and pair counts for the most recent tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickProfile {
    pub field_time: Duration,
    pub integrator_time: Duration,
    pub broad_phase_time: Duration,
    pub narrow_phase_time: Duration,
    pub total_time: Duration,

    pub simulated_ms: u64,
    pub object_count: usize,
    pub candidate_pairs: usize,
    pub collisions: usize,
}

/// Keeps the last tick's profile and a rolling average of wall-clock tick time,
/// reported at debug level once per report window of simulated time.
#[derive(Debug, Default)]
pub struct TickProfiler {
    last: TickProfile,
    window_ticks: u32,
    window_time: Duration,
    window_simulated_ms: u64,
}

impl TickProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> &TickProfile {
        &self.last
    }

    pub fn record(&mut self, profile: TickProfile) {
        self.last = profile;
        self.window_ticks += 1;
        self.window_time += profile.total_time;
        self.window_simulated_ms += profile.simulated_ms;

        if self.window_simulated_ms >= PROFILE_REPORT_WINDOW_MS {
            let average = self.window_time / self.window_ticks;
            debug!(
                "average physics tick: {:.3} ms over {} ticks",
                average.as_secs_f64() * 1000.0,
                self.window_ticks
            );
            self.window_ticks = 0;
            self.window_time = Duration::ZERO;
            self.window_simulated_ms = 0;
        }
    }
}

/// Adds the elapsed time of a scope to a profile slot on drop.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
