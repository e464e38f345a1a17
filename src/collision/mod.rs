//! Collision detection: shapes, broad-phase sweep, narrow-phase tests, walk-back and queries.

pub mod shapes;
pub mod broadphase;
pub mod narrowphase;
pub mod walkback;
pub mod queries;

pub use broadphase::{insertion_sort_by_start, BroadPhase};
pub use shapes::{Circle, EdgeProjection, Placed, Polygon, Rectangle, Shape, ShapeKind};
pub use walkback::{walk_back, Mover};
