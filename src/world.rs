use std::sync::Arc;
use std::time::Instant;

use glam::DVec2;
use log::debug;

use crate::{
    collision::{
        broadphase::{insertion_sort_by_start, BroadPhase},
        queries::{self, Candidate},
        walkback::{ms_to_seconds, walk_back, Mover},
    },
    config::EngineConfig,
    core::{
        boundary::Boundary,
        collision_type::CollisionMatrix,
        object::{CollisionBehavior, PhysicsObject},
        types::{Interval, Point},
    },
    dynamics::solver::{expunge, resolve_velocities},
    error::{PhysicsError, PhysicsResult, PoolKind},
    utils::{
        allocator::{Arena, ObjectId},
        logging::{warn_on_error, ScopedTimer},
        math::unit,
        pool::StagedPool,
        profiling::{PhaseTimer, TickProfile, TickProfiler},
    },
};

/// Central simulation container: owns every physics object, the four pools of
/// active parts and the collision matrix, and advances them tick by tick.
pub struct PhysicsWorld {
    objects: Arena<PhysicsObject>,
    active: StagedPool<ObjectId>,
    boundaries: StagedPool<ObjectId>,
    vectors: StagedPool<ObjectId>,
    fields: StagedPool<ObjectId>,
    matrix: CollisionMatrix,
    config: EngineConfig,
    broad_phase: BroadPhase<ObjectId>,
    profiler: TickProfiler,
    simulated_ms: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PhysicsWorld {
    pub fn new(config: EngineConfig) -> Self {
        let capacities = config.capacities;
        Self {
            objects: Arena::with_capacity(capacities.objects),
            active: StagedPool::new(PoolKind::Objects, capacities.objects),
            boundaries: StagedPool::new(PoolKind::Boundaries, capacities.boundaries),
            vectors: StagedPool::new(PoolKind::Vectors, capacities.vectors),
            fields: StagedPool::new(PoolKind::Fields, capacities.fields),
            matrix: CollisionMatrix::default(),
            config,
            broad_phase: BroadPhase::new(),
            profiler: TickProfiler::new(),
            simulated_ms: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn matrix(&self) -> &CollisionMatrix {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut CollisionMatrix {
        &mut self.matrix
    }

    /// Profile of the most recent tick.
    pub fn profile(&self) -> &TickProfile {
        self.profiler.last()
    }

    /// Total simulated time in milliseconds.
    pub fn simulated_ms(&self) -> u64 {
        self.simulated_ms
    }

    /// Stores an object without activating it.
    pub fn insert(&mut self, object: PhysicsObject) -> ObjectId {
        let mut object = object;
        object.active = false;
        self.objects.insert(object)
    }

    /// Stores and activates an object in one call. On a full pool the object
    /// stays stored but inactive.
    pub fn spawn(&mut self, object: PhysicsObject) -> PhysicsResult<ObjectId> {
        let id = self.insert(object);
        self.add(id)?;
        Ok(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&PhysicsObject> {
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut PhysicsObject> {
        self.objects.get_mut(id)
    }

    /// Number of stored objects, active or not.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Activates an object and registers each part it has with its pool.
    ///
    /// Parts are registered as they are at this call; attach them before
    /// activating. Nothing is staged unless every pool involved has room.
    /// Changes become visible at the start of the next tick.
    pub fn add(&mut self, id: ObjectId) -> PhysicsResult<()> {
        let object = self.objects.get(id).ok_or(PhysicsError::UnknownObject(id))?;
        if object.active {
            return Ok(());
        }

        let mut pools: Vec<&mut StagedPool<ObjectId>> = vec![&mut self.active];
        if object.boundary.is_some() {
            pools.push(&mut self.boundaries);
        }
        if object.motion.is_some() {
            pools.push(&mut self.vectors);
        }
        if object.field.is_some() {
            pools.push(&mut self.fields);
        }

        if let Some(full) = pools.iter().find(|pool| !pool.has_room()) {
            let error = PhysicsError::PoolFull {
                pool: full.kind(),
                capacity: full.capacity(),
            };
            return Err(warn_on_error("cannot activate physics object", error));
        }
        for pool in pools {
            pool.add(id)?;
        }

        if let Some(object) = self.objects.get_mut(id) {
            object.active = true;
        }
        debug!("physics object {:?} added", id);
        Ok(())
    }

    /// Deactivates an object and unregisters its parts at the next tick.
    pub fn remove(&mut self, id: ObjectId) -> PhysicsResult<()> {
        let object = self.objects.get_mut(id).ok_or(PhysicsError::UnknownObject(id))?;
        if !object.active {
            return Ok(());
        }
        object.active = false;

        for pool in [
            &mut self.active,
            &mut self.boundaries,
            &mut self.vectors,
            &mut self.fields,
        ] {
            if pool.contains(id) {
                pool.remove(id);
            }
        }
        debug!("physics object {:?} removed", id);
        Ok(())
    }

    /// Deactivates the object and strips all of its parts for reuse.
    pub fn reset(&mut self, id: ObjectId) -> PhysicsResult<()> {
        self.remove(id)?;
        if let Some(object) = self.objects.get_mut(id) {
            object.clear();
        }
        Ok(())
    }

    /// Deactivates the object and frees its slot, returning it.
    pub fn release(&mut self, id: ObjectId) -> PhysicsResult<PhysicsObject> {
        self.remove(id)?;
        let mut object = self.objects.remove(id).ok_or(PhysicsError::UnknownObject(id))?;
        object.active = false;
        Ok(object)
    }

    /// Drops every object and empties every pool, e.g. between levels.
    pub fn clear_objects(&mut self) {
        self.active.clear();
        self.boundaries.clear();
        self.vectors.clear();
        self.fields.clear();
        self.objects.clear();
        debug!("physics objects cleared");
    }

    /// Ids of the active objects as of the last tick.
    pub fn active_objects(&self) -> Vec<ObjectId> {
        self.active.as_slice().to_vec()
    }

    /// Non-passive active objects whose boundary overlaps `probe` placed at
    /// `at` and shares its z-slab. Collision types are otherwise ignored.
    pub fn check_collision(&self, probe: &Boundary, at: Point) -> Vec<ObjectId> {
        queries::overlapping(self.candidates(), probe, at)
    }

    /// Whether nothing solid lies on the segment `start..end`. With `plane`,
    /// only boundaries whose slab contains that z block the view.
    pub fn line_of_sight(&self, start: DVec2, end: DVec2, plane: Option<f64>) -> bool {
        queries::line_of_sight(self.candidates(), start, end, plane)
    }

    fn candidates(&self) -> impl Iterator<Item = Candidate<'_, ObjectId>> + '_ {
        self.boundaries.iter().filter_map(move |id| {
            let object = self.objects.get(id)?;
            let boundary = object.boundary.as_ref()?;
            Some(Candidate {
                id,
                kind: object.kind,
                boundary,
                position: object.position,
            })
        })
    }

    /// Advances the simulation by `seconds`, truncated to whole milliseconds
    /// and capped at the configured maximum delay.
    pub fn update(&mut self, seconds: f64) {
        let elapsed_ms = (seconds * 1000.0) as u64;
        self.step_ms(elapsed_ms);
    }

    /// Advances the simulation by `elapsed_ms`, capped at the configured
    /// maximum delay.
    pub fn step_ms(&mut self, elapsed_ms: u64) {
        let elapsed_ms = elapsed_ms.min(self.config.max_delay_ms);
        let started = Instant::now();
        let mut profile = TickProfile {
            simulated_ms: elapsed_ms,
            ..TickProfile::default()
        };
        let dt = ms_to_seconds(elapsed_ms);

        self.commit_pools();
        profile.object_count = self.active.count();

        {
            let _timer = ScopedTimer::new("fields::apply");
            let _phase = PhaseTimer::new(&mut profile.field_time);
            self.clear_outside_accelerations();
            self.refresh_fields();
            self.refresh_boundaries();
            self.apply_fields();
        }

        {
            let _timer = ScopedTimer::new("integrator");
            let _phase = PhaseTimer::new(&mut profile.integrator_time);
            self.integrate(dt);
        }

        {
            let _timer = ScopedTimer::new("broadphase");
            let _phase = PhaseTimer::new(&mut profile.broad_phase_time);
            self.refresh_boundaries();
            let objects = &self.objects;
            self.broad_phase.find_pairs(self.boundaries.as_slice(), |id| {
                objects.get(id).and_then(|object| object.boundary.as_ref())
            });
            profile.candidate_pairs = self.broad_phase.pairs().len();
        }

        {
            let _timer = ScopedTimer::new("narrowphase");
            let _phase = PhaseTimer::new(&mut profile.narrow_phase_time);
            let tolerance = self.config.expunge_tolerance;
            for &pair in self.broad_phase.pairs() {
                if resolve_pair(&mut self.objects, &self.matrix, pair, elapsed_ms, tolerance) {
                    profile.collisions += 1;
                }
            }
        }

        self.simulated_ms += elapsed_ms;
        profile.total_time = started.elapsed();
        self.profiler.record(profile);
    }

    fn commit_pools(&mut self) {
        self.vectors.commit();
        self.fields.commit();
        self.boundaries.commit();
        self.active.commit();
    }

    fn clear_outside_accelerations(&mut self) {
        for id in self.vectors.iter() {
            if let Some(motion) = self.objects.get_mut(id).and_then(|o| o.motion.as_mut()) {
                motion.clear_outside_acceleration();
            }
        }
    }

    /// Recomputes field area projections and sorts the field pool by x start.
    fn refresh_fields(&mut self) {
        for id in self.fields.iter() {
            if let Some(object) = self.objects.get_mut(id) {
                let position = object.position;
                if let Some(field) = object.field.as_mut() {
                    field.area_mut().update_projections(position);
                }
            }
        }
        let objects = &self.objects;
        insertion_sort_by_start(self.fields.as_mut_slice(), |id| {
            objects
                .get(id)
                .and_then(|object| object.field.as_ref())
                .map(|field| field.area().projections().x)
        });
    }

    /// Recomputes boundary projections and sorts the boundary pool by x start.
    fn refresh_boundaries(&mut self) {
        for id in self.boundaries.iter() {
            if let Some(object) = self.objects.get_mut(id) {
                let position = object.position;
                if let Some(boundary) = object.boundary.as_mut() {
                    boundary.update_projections(position);
                }
            }
        }
        let objects = &self.objects;
        insertion_sort_by_start(self.boundaries.as_mut_slice(), |id| {
            objects
                .get(id)
                .and_then(|object| object.boundary.as_ref())
                .map(|boundary| boundary.projections().x)
        });
    }

    /// Adds the acceleration of every field covering a moving object to that
    /// object's outside acceleration. Fields are sorted by x start, so the scan
    /// ends at the first field starting right of the object.
    fn apply_fields(&mut self) {
        let fields = self.fields.as_slice();
        for body_id in self.vectors.iter() {
            let body_x = match self.objects.get(body_id) {
                Some(body) => match &body.boundary {
                    Some(boundary) => boundary.projections().x,
                    None => Interval::new(body.position.x, body.position.x),
                },
                None => continue,
            };

            for &field_id in fields {
                if field_id == body_id {
                    continue;
                }
                let Some((owner, body)) = self.objects.get2_mut(field_id, body_id) else {
                    continue;
                };
                let Some(field) = owner.field.as_ref() else {
                    continue;
                };
                let area = field.area();
                let area_projections = area.projections();
                if area_projections.x.start > body_x.end {
                    break;
                }
                if !area_projections.x.overlaps(&body_x) {
                    continue;
                }

                let PhysicsObject {
                    position,
                    boundary,
                    motion,
                    ..
                } = body;
                let reachable = match boundary.as_ref() {
                    Some(boundary) => {
                        area_projections.y.overlaps(&boundary.projections().y)
                            && area.is_coplanar(boundary)
                    }
                    None => {
                        area_projections.y.contains(position.y)
                            && area.is_coplanar_with_plane(position.z)
                    }
                };
                if !reachable {
                    continue;
                }
                if let Some(motion) = motion.as_mut() {
                    field.apply(owner.position, *position, boundary.as_ref(), motion);
                }
            }
        }
    }

    fn integrate(&mut self, dt: f64) {
        let max_velocity = self.config.max_velocity;
        for id in self.vectors.iter() {
            if let Some(object) = self.objects.get_mut(id) {
                let PhysicsObject {
                    position, motion, ..
                } = object;
                if let Some(motion) = motion.as_mut() {
                    motion.step(position, dt, max_velocity);
                }
            }
        }
    }
}

fn notify(
    listener: &Option<Arc<dyn CollisionBehavior>>,
    other: &Option<Arc<dyn CollisionBehavior>>,
) {
    if let Some(listener) = listener {
        listener.handle_collision(other.as_ref());
    }
}

/// Narrow phase and response for one broad-phase pair. Returns whether the
/// pair collided (or, for a trigger, overlapped).
fn resolve_pair(
    objects: &mut Arena<PhysicsObject>,
    matrix: &CollisionMatrix,
    (id_a, id_b): (ObjectId, ObjectId),
    elapsed_ms: u64,
    tolerance: f64,
) -> bool {
    let Some((a, b)) = objects.get2_mut(id_a, id_b) else {
        return false;
    };
    let PhysicsObject {
        kind: kind_a,
        position: pos_a,
        boundary: slot_a,
        motion: motion_a,
        listener: listener_a,
        ..
    } = a;
    let PhysicsObject {
        kind: kind_b,
        position: pos_b,
        boundary: slot_b,
        motion: motion_b,
        listener: listener_b,
        ..
    } = b;
    let (Some(boundary_a), Some(boundary_b)) = (slot_a.as_ref(), slot_b.as_ref()) else {
        return false;
    };

    // Triggers: no physical response, only the non-passive side hears about it.
    if kind_a.is_passive() || kind_b.is_passive() {
        if kind_a.is_passive() && kind_b.is_passive() {
            return false;
        }
        if !boundary_a.intersects(*pos_a, boundary_b, *pos_b) {
            return false;
        }
        if kind_a.is_passive() {
            notify(listener_b, listener_a);
        } else {
            notify(listener_a, listener_b);
        }
        return true;
    }

    if !matrix.allows(*kind_a, *kind_b)
        || (motion_a.is_none() && motion_b.is_none())
        || !boundary_a.intersects(*pos_a, boundary_b, *pos_b)
    {
        return false;
    }

    let remaining_ms = {
        let mover_a = Mover::new(boundary_a, *pos_a, motion_a.as_ref());
        let mover_b = Mover::new(boundary_b, *pos_b, motion_b.as_ref());
        let contact_ms = walk_back(&mover_a, &mover_b, elapsed_ms);
        let rewind = -ms_to_seconds(elapsed_ms - contact_ms);
        *pos_a = mover_a.drifted(rewind);
        *pos_b = mover_b.drifted(rewind);
        elapsed_ms - contact_ms
    };

    let normal = unit(boundary_a.normal_of_collision(*pos_a, boundary_b, *pos_b));
    resolve_velocities(motion_a.as_mut(), motion_b.as_mut(), normal);

    let forward = ms_to_seconds(remaining_ms);
    if let Some(motion) = motion_a.as_ref() {
        motion.integrate_position(pos_a, forward);
    }
    if let Some(motion) = motion_b.as_ref() {
        motion.integrate_position(pos_b, forward);
    }

    if boundary_a.intersects(*pos_a, boundary_b, *pos_b) {
        let placed_a = boundary_a.placed(*pos_a);
        let placed_b = boundary_b.placed(*pos_b);
        let normal = unit(boundary_a.normal_of_collision(*pos_a, boundary_b, *pos_b));
        let (offset_a, offset_b) = expunge(
            placed_a,
            placed_b,
            normal,
            motion_a.is_some(),
            motion_b.is_some(),
            tolerance,
        );
        *pos_a += offset_a.extend(0.0);
        *pos_b += offset_b.extend(0.0);
    }

    if let Some(boundary) = slot_a.as_mut() {
        boundary.update_projections(*pos_a);
    }
    if let Some(boundary) = slot_b.as_mut() {
        boundary.update_projections(*pos_b);
    }

    notify(listener_a, listener_b);
    notify(listener_b, listener_a);
    true
}
