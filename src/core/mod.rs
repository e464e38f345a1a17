//! Core types describing physics objects and their parts.

pub mod types;
pub mod boundary;
pub mod collision_type;
pub mod object;

pub use boundary::Boundary;
pub use collision_type::{CollisionMatrix, CollisionType};
pub use object::{CollisionBehavior, CollisionRecorder, PhysicsObject, PhysicsObjectBuilder};
pub use types::{Interval, Point, Projections};
