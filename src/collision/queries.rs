use glam::DVec2;

use crate::{
    collision::narrowphase,
    core::{boundary::Boundary, collision_type::CollisionType, types::Point},
};

/// An active boundary offered to a query.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a, T> {
    pub id: T,
    pub kind: CollisionType,
    pub boundary: &'a Boundary,
    pub position: Point,
}

/// Ids of non-passive candidates coplanar with and overlapping `probe` placed
/// at `at`. The collision matrix is not consulted.
pub fn overlapping<'a, T: Copy>(
    candidates: impl IntoIterator<Item = Candidate<'a, T>>,
    probe: &Boundary,
    at: Point,
) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|c| !c.kind.is_passive())
        .filter(|c| c.boundary.is_coplanar_at(c.position, probe, at))
        .filter(|c| c.boundary.intersects(c.position, probe, at))
        .map(|c| c.id)
        .collect()
}

/// Whether the segment `start..end` is clear of every non-passive candidate.
///
/// With a `plane`, only candidates whose slab contains that z are obstacles;
/// without one, z is ignored.
pub fn line_of_sight<'a, T>(
    candidates: impl IntoIterator<Item = Candidate<'a, T>>,
    start: DVec2,
    end: DVec2,
    plane: Option<f64>,
) -> bool {
    !candidates.into_iter().any(|c| {
        if c.kind.is_passive() {
            return false;
        }
        if let Some(z) = plane {
            if c.boundary.height() != 0.0 && !c.boundary.slab_at(c.position).contains(z) {
                return false;
            }
        }
        narrowphase::intersects_segment(c.boundary.placed(c.position), start, end)
    })
}
