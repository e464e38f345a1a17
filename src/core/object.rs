use std::fmt;
use std::sync::Arc;

use glam::DVec2;
use parking_lot::Mutex;

use crate::{
    collision::shapes::Shape,
    core::{boundary::Boundary, collision_type::CollisionType, types::Point},
    dynamics::{fields::Field, motion::Motion},
};

/// Receives collision notifications for an object.
///
/// `other` is the other party's listener, if it has one. Implementations are
/// called synchronously from inside the tick and must not call back into the
/// world.
pub trait CollisionBehavior: Send + Sync {
    fn handle_collision(&self, other: Option<&Arc<dyn CollisionBehavior>>);

    /// Optional name, handy for telling parties apart inside `handle_collision`.
    fn label(&self) -> Option<&str> {
        None
    }
}

/// Listener that records every notification it receives, by the other
/// party's label.
#[derive(Debug, Default)]
pub struct CollisionRecorder {
    label: String,
    hits: Mutex<Vec<Option<String>>>,
}

impl CollisionRecorder {
    pub fn new(label: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            label: label.into(),
            hits: Mutex::new(Vec::new()),
        })
    }

    /// Labels of the other parties, oldest first. `None` marks a party without
    /// a listener or without a label.
    pub fn hits(&self) -> Vec<Option<String>> {
        self.hits.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.hits.lock().len()
    }

    pub fn clear(&self) {
        self.hits.lock().clear();
    }
}

impl CollisionBehavior for CollisionRecorder {
    fn handle_collision(&self, other: Option<&Arc<dyn CollisionBehavior>>) {
        let label = other.and_then(|o| o.label()).map(str::to_owned);
        self.hits.lock().push(label);
    }

    fn label(&self) -> Option<&str> {
        Some(&self.label)
    }
}

/// A simulated entity: a collision type, a position and any of a boundary, a
/// motion state and a field.
pub struct PhysicsObject {
    pub kind: CollisionType,
    pub position: Point,
    pub boundary: Option<Boundary>,
    pub motion: Option<Motion>,
    pub field: Option<Field>,
    pub listener: Option<Arc<dyn CollisionBehavior>>,
    pub(crate) active: bool,
}

impl fmt::Debug for PhysicsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsObject")
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("boundary", &self.boundary)
            .field("motion", &self.motion)
            .field("field", &self.field)
            .field("listener", &self.listener.as_ref().and_then(|l| l.label()))
            .field("active", &self.active)
            .finish()
    }
}

impl Default for PhysicsObject {
    fn default() -> Self {
        Self {
            kind: CollisionType::Mob,
            position: Point::ZERO,
            boundary: None,
            motion: None,
            field: None,
            listener: None,
            active: false,
        }
    }
}

impl PhysicsObject {
    pub fn builder() -> PhysicsObjectBuilder {
        PhysicsObjectBuilder::new()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the collision type from a raw index; out-of-range values become `Mob`.
    pub fn set_kind_index(&mut self, index: usize) {
        self.kind = CollisionType::from_index(index);
    }

    /// Strips every part and restores the defaults so the object can be reused.
    /// Deactivation is the world's job; see [`crate::world::PhysicsWorld::reset`].
    pub(crate) fn clear(&mut self) {
        let active = self.active;
        *self = Self::default();
        self.active = active;
    }
}

/// Fluent constructor for [`PhysicsObject`].
pub struct PhysicsObjectBuilder {
    object: PhysicsObject,
}

impl Default for PhysicsObjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsObjectBuilder {
    pub fn new() -> Self {
        Self {
            object: PhysicsObject::default(),
        }
    }

    pub fn kind(mut self, kind: CollisionType) -> Self {
        self.object.kind = kind;
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.object.position.x = x;
        self.object.position.y = y;
        self
    }

    pub fn depth(mut self, z: f64) -> Self {
        self.object.position.z = z;
        self
    }

    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.object.boundary = Some(boundary);
        self
    }

    pub fn shape(self, shape: impl Into<Shape>) -> Self {
        self.boundary(Boundary::new(shape))
    }

    pub fn motion(mut self, motion: Motion) -> Self {
        self.object.motion = Some(motion);
        self
    }

    /// Shorthand for a [`Motion`] of the given mass and velocity.
    pub fn velocity(self, mass: f64, velocity: DVec2) -> Self {
        self.motion(Motion::new(mass, velocity))
    }

    pub fn field(mut self, field: Field) -> Self {
        self.object.field = Some(field);
        self
    }

    pub fn listener(mut self, listener: Arc<dyn CollisionBehavior>) -> Self {
        self.object.listener = Some(listener);
        self
    }

    pub fn build(self) -> PhysicsObject {
        self.object
    }
}
