//! Planar Physics – fixed-step 2D collision and field simulation for games.
//!
//! Objects live in a [`PhysicsWorld`] and carry any of a boundary (one shape on
//! a z-slab), a motion vector and an acceleration field. Each tick applies
//! fields, integrates motion, sweeps boundaries for candidate pairs and
//! resolves collisions by walking back to the moment of contact.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::{DVec2, DVec3};

pub use collision::shapes::{Circle, Polygon, Rectangle, Shape};
pub use config::{Capacities, EngineConfig};
pub use core::{
    boundary::Boundary,
    collision_type::{CollisionMatrix, CollisionType},
    object::{CollisionBehavior, CollisionRecorder, PhysicsObject, PhysicsObjectBuilder},
    types::{Interval, Point},
};
pub use dynamics::{
    fields::{ConstantRate, DragField, Field, FieldBehavior, UniformField},
    motion::Motion,
};
pub use error::{PhysicsError, PhysicsResult, PoolKind};
pub use utils::allocator::{Arena, ObjectId};
pub use utils::profiling::TickProfile;
pub use world::PhysicsWorld;

/// High-level wrapper that creates its [`PhysicsWorld`] on first initialization.
#[derive(Default)]
pub struct PhysicsEngine {
    world: Option<PhysicsWorld>,
}

impl PhysicsEngine {
    /// Creates an engine with no world yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the world from `config` on the first call. Later calls return
    /// the existing world and ignore `config`.
    pub fn initialize(&mut self, config: EngineConfig) -> &mut PhysicsWorld {
        self.world.get_or_insert_with(|| {
            log::debug!("physics engine initialized");
            PhysicsWorld::new(config)
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    pub fn world(&self) -> Option<&PhysicsWorld> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut PhysicsWorld> {
        self.world.as_mut()
    }

    /// Advances the world by `seconds`. Does nothing before initialization.
    pub fn update(&mut self, seconds: f64) {
        if let Some(world) = self.world.as_mut() {
            world.update(seconds);
        }
    }

    /// Drops every object in the world, if there is one.
    pub fn clear_objects(&mut self) {
        if let Some(world) = self.world.as_mut() {
            world.clear_objects();
        }
    }
}
