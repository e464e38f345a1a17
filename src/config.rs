//! Global configuration constants and the runtime engine configuration.

use serde::{Deserialize, Serialize};

/// Default number of active fields.
pub const DEFAULT_MAX_FIELDS: usize = 64;

/// Default number of active motion vectors.
pub const DEFAULT_MAX_VECTORS: usize = 256;

/// Default number of active boundaries.
pub const DEFAULT_MAX_BOUNDARIES: usize = 256;

/// Default number of active physics objects.
pub const DEFAULT_MAX_OBJECTS: usize = 384;

/// Ceiling on the time a single tick may simulate, in milliseconds.
pub const DEFAULT_MAX_DELAY_MS: u64 = 30;

/// Maximum planar speed; the z component is clamped to the same magnitude.
pub const DEFAULT_MAX_VELOCITY: f64 = 1000.0;

/// Extra separation added on top of the penetration depth when expunging.
pub const EXPUNGE_TOLERANCE: f64 = 0.1;

/// Upper bound on a motion vector's mass.
pub const MAX_MASS: f64 = 50.0;

/// Deceleration applied by [`Motion::brake`](crate::dynamics::motion::Motion::brake), in units/s².
pub const BRAKE_RATE: f64 = 900.0;

/// Default z-slab thickness of a boundary.
pub const DEFAULT_BOUNDARY_HEIGHT: f64 = 1.0;

/// Simulated time accumulated between two average tick time reports.
pub const PROFILE_REPORT_WINDOW_MS: u64 = 10_000;

/// Fixed capacity of each entity pool. Capacities never grow after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capacities {
    pub fields: usize,
    pub vectors: usize,
    pub boundaries: usize,
    pub objects: usize,
}

impl Default for Capacities {
    fn default() -> Self {
        Self {
            fields: DEFAULT_MAX_FIELDS,
            vectors: DEFAULT_MAX_VECTORS,
            boundaries: DEFAULT_MAX_BOUNDARIES,
            objects: DEFAULT_MAX_OBJECTS,
        }
    }
}

/// Runtime settings for a [`PhysicsWorld`](crate::world::PhysicsWorld).
///
/// Every field is optional when deserializing; missing keys take the defaults
/// above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub capacities: Capacities,
    pub max_delay_ms: u64,
    pub max_velocity: f64,
    pub expunge_tolerance: f64,
}

impl EngineConfig {
    pub fn with_capacities(fields: usize, vectors: usize, boundaries: usize, objects: usize) -> Self {
        Self {
            capacities: Capacities {
                fields,
                vectors,
                boundaries,
                objects,
            },
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacities: Capacities::default(),
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            max_velocity: DEFAULT_MAX_VELOCITY,
            expunge_tolerance: EXPUNGE_TOLERANCE,
        }
    }
}
