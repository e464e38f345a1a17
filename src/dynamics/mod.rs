//! Simulation dynamics: motion vectors, acceleration fields and collision response.

pub mod fields;
pub mod motion;
pub mod solver;

pub use fields::{ConstantRate, DragField, Field, FieldBehavior, UniformField};
pub use motion::Motion;
pub use solver::{expunge, resolve_velocities};
