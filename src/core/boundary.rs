use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::collision::narrowphase;
use crate::collision::shapes::{Placed, Shape};
use crate::config::DEFAULT_BOUNDARY_HEIGHT;
use crate::core::types::{Interval, Point, Projections};

/// Collision volume of an object: one shape, the thickness of its z-slab and the
/// axis projections cached for the broad phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    shape: Shape,
    height: f64,
    #[serde(skip)]
    projections: Projections,
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(Shape::default())
    }
}

impl Boundary {
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            height: DEFAULT_BOUNDARY_HEIGHT,
            projections: Projections::default(),
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.set_height(height);
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    /// Replaces the shape. A boundary never holds more than one.
    pub fn set_shape(&mut self, shape: impl Into<Shape>) {
        self.shape = shape.into();
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the slab thickness; negative heights reset to the default.
    pub fn set_height(&mut self, height: f64) {
        self.height = if height < 0.0 {
            DEFAULT_BOUNDARY_HEIGHT
        } else {
            height
        };
    }

    /// The shape placed at the planar part of `at`.
    pub fn placed(&self, at: Point) -> Placed<'_> {
        self.shape.at(at.truncate())
    }

    /// Projections of the boundary positioned at `at`, without touching the cache.
    pub fn projections_at(&self, at: Point) -> Projections {
        let (x, y) = self.placed(at).extents();
        Projections {
            x,
            y,
            z: self.slab_at(at),
        }
    }

    /// Recomputes the cached projections for the boundary positioned at `at`.
    pub fn update_projections(&mut self, at: Point) {
        self.projections = self.projections_at(at);
    }

    /// Projections as of the last [`Boundary::update_projections`].
    pub fn projections(&self) -> &Projections {
        &self.projections
    }

    /// The z-slab of the boundary positioned at `at`.
    pub fn slab_at(&self, at: Point) -> Interval {
        Interval::new(at.z, at.z + self.height)
    }

    /// Whether the two cached slabs overlap. A zero-height slab is coplanar
    /// with everything.
    pub fn is_coplanar(&self, other: &Boundary) -> bool {
        self.height == 0.0
            || other.height == 0.0
            || self.projections.z.overlaps(&other.projections.z)
    }

    /// [`Boundary::is_coplanar`] for explicit positions, ignoring the caches.
    pub fn is_coplanar_at(&self, at: Point, other: &Boundary, other_at: Point) -> bool {
        self.height == 0.0
            || other.height == 0.0
            || self.slab_at(at).overlaps(&other.slab_at(other_at))
    }

    /// Whether the cached slab contains the plane `z`.
    pub fn is_coplanar_with_plane(&self, z: f64) -> bool {
        self.height == 0.0 || self.projections.z.contains(z)
    }

    pub fn intersects(&self, at: Point, other: &Boundary, other_at: Point) -> bool {
        narrowphase::intersects(self.placed(at), other.placed(other_at))
    }

    pub fn contains_point(&self, at: Point, point: DVec2) -> bool {
        narrowphase::contains_point(self.placed(at), point)
    }

    /// Collision normal angle pointing from this boundary toward `other`.
    pub fn normal_of_collision(&self, at: Point, other: &Boundary, other_at: Point) -> f64 {
        narrowphase::normal_of_collision(self.placed(at), other.placed(other_at))
    }
}
