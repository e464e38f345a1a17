//! Rewind search for the moment two moving objects first touched.
//!
//! Positions are only ever drifted along the current velocity, without
//! acceleration, so rewinding and re-advancing are exact inverses of each
//! other and the search can evaluate any instant directly.

use crate::core::boundary::Boundary;
use crate::core::types::Point;
use crate::dynamics::motion::Motion;

/// One party of a collision as seen by the rewind search: its boundary, its
/// position at the end of the tick and its motion, if it moves at all.
#[derive(Debug, Clone, Copy)]
pub struct Mover<'a> {
    pub boundary: &'a Boundary,
    pub position: Point,
    pub motion: Option<&'a Motion>,
}

impl<'a> Mover<'a> {
    pub fn new(boundary: &'a Boundary, position: Point, motion: Option<&'a Motion>) -> Self {
        Self {
            boundary,
            position,
            motion,
        }
    }

    /// Position after drifting `seconds` along the current velocity. Negative
    /// values rewind.
    pub fn drifted(&self, seconds: f64) -> Point {
        let mut position = self.position;
        if let Some(motion) = self.motion {
            motion.integrate_position(&mut position, seconds);
        }
        position
    }
}

/// Milliseconds to seconds.
pub fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Bisects `0..=elapsed_ms` for the last whole millisecond at which
/// `intersects_at` reports no overlap. The search starts at the midpoint and
/// stops once the window is a single millisecond wide.
pub fn bisect_contact_time(elapsed_ms: u64, mut intersects_at: impl FnMut(u64) -> bool) -> u64 {
    let mut left = 0;
    let mut right = elapsed_ms;
    let mut current = elapsed_ms / 2;
    loop {
        if intersects_at(current) {
            right = current;
        } else {
            left = current;
        }
        current = (left + right) / 2;
        if left + 1 >= right {
            return current;
        }
    }
}

/// Contact time of two objects that overlap at the end of a tick lasting
/// `elapsed_ms`, measured from the start of the tick.
pub fn walk_back(a: &Mover<'_>, b: &Mover<'_>, elapsed_ms: u64) -> u64 {
    bisect_contact_time(elapsed_ms, |t| {
        let rewind = -ms_to_seconds(elapsed_ms - t);
        a.boundary
            .intersects(a.drifted(rewind), b.boundary, b.drifted(rewind))
    })
}
