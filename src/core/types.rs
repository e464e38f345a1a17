use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Common math types re-exported for convenience.
pub use glam::DVec2;

/// Location of an entity. `z` only places the entity's slab; motion is planar.
pub type Point = DVec3;

/// 1-D projection of a shape onto an axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Builds an interval from two bounds given in any order.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Closed-interval overlap; touching endpoints count.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains(&self, value: f64) -> bool {
        self.start <= value && value <= self.end
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Signed gap between the two intervals; negative when they overlap.
    pub fn distance(&self, other: &Interval) -> f64 {
        if self.start < other.start {
            other.start - self.end
        } else {
            self.start - other.end
        }
    }
}

/// Cached axis projections of a placed boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Projections {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Projections {
    /// Overlap on both planar axes, the broad-phase condition before coplanarity.
    pub fn overlaps_planar(&self, other: &Projections) -> bool {
        self.x.overlaps(&other.x) && self.y.overlaps(&other.y)
    }
}
