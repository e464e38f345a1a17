//! Velocity response and positional correction for a colliding pair.

use glam::DVec2;

use crate::collision::narrowphase::penetration_depth;
use crate::collision::shapes::Placed;
use crate::dynamics::motion::Motion;

/// Updates the velocities of a colliding pair along the unit `normal`, which
/// points from `a` toward `b`.
///
/// Two moving objects exchange an elastic impulse along the normal. A single
/// moving object bounces off the other as if it were immovable: its velocity
/// is reflected about the normal, keeping its speed.
pub fn resolve_velocities(a: Option<&mut Motion>, b: Option<&mut Motion>, normal: DVec2) {
    match (a, b) {
        (Some(a), Some(b)) => {
            let (ma, mb) = (a.mass(), b.mass());
            let relative = a.planar_velocity() - b.planar_velocity();
            let impulse = 2.0 * ma * mb / (ma + mb) * relative.dot(normal);
            a.set_planar_velocity(a.planar_velocity() - normal * (impulse / ma));
            b.set_planar_velocity(b.planar_velocity() + normal * (impulse / mb));
        }
        (Some(moving), None) | (None, Some(moving)) => {
            let v = moving.planar_velocity();
            moving.set_planar_velocity(v - normal * (2.0 * v.dot(normal)));
        }
        (None, None) => {}
    }
}

/// Displacements that push two overlapping shapes apart along the unit
/// `normal` (from `a` toward `b`), returned as `(a_offset, b_offset)`.
///
/// The penetration depth plus `tolerance` is split evenly when both objects
/// move; otherwise the moving one takes the whole distance. Two static
/// objects are left where they are.
pub fn expunge(
    a: Placed<'_>,
    b: Placed<'_>,
    normal: DVec2,
    a_dynamic: bool,
    b_dynamic: bool,
    tolerance: f64,
) -> (DVec2, DVec2) {
    let separation = penetration_depth(a, b, normal).max(0.0) + tolerance;
    match (a_dynamic, b_dynamic) {
        (true, true) => {
            let half = normal * (separation / 2.0);
            (-half, half)
        }
        (true, false) => (-normal * separation, DVec2::ZERO),
        (false, true) => (DVec2::ZERO, normal * separation),
        (false, false) => (DVec2::ZERO, DVec2::ZERO),
    }
}
