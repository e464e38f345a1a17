use approx::assert_relative_eq;
use planar_physics::*;
use std::f64::consts::{FRAC_PI_2, TAU};

fn mob(x: f64, vx: f64) -> PhysicsObject {
    PhysicsObject::builder()
        .kind(CollisionType::Mob)
        .position(x, 0.0)
        .shape(Shape::circle(1.0))
        .velocity(1.0, DVec2::new(vx, 0.0))
        .build()
}

fn velocity_of(world: &PhysicsWorld, id: ObjectId) -> DVec2 {
    world
        .object(id)
        .and_then(|object| object.motion.as_ref())
        .map(Motion::planar_velocity)
        .expect("object should move")
}

#[test]
fn equal_masses_exchange_velocities_head_on() {
    let mut world = PhysicsWorld::default();
    let a = world.spawn(mob(-3.0, 100.0)).unwrap();
    let b = world.spawn(mob(3.0, -100.0)).unwrap();

    world.step_ms(30);

    assert_relative_eq!(velocity_of(&world, a).x, -100.0, epsilon = 1e-9);
    assert_relative_eq!(velocity_of(&world, b).x, 100.0, epsilon = 1e-9);

    // Touching at 20 ms, then 10 ms apart.
    let xa = world.object(a).unwrap().position.x;
    let xb = world.object(b).unwrap().position.x;
    assert_relative_eq!(xa, -2.0, epsilon = 1e-9);
    assert_relative_eq!(xb, 2.0, epsilon = 1e-9);
    assert_eq!(world.profile().collisions, 1);
}

#[test]
fn moving_body_bounces_off_a_wall() {
    let mut world = PhysicsWorld::default();
    let ball = world.spawn(mob(0.0, 100.0)).unwrap();
    let wall = world
        .spawn(
            PhysicsObject::builder()
                .kind(CollisionType::VisibleWall)
                .position(2.5, 5.0)
                .shape(Shape::rectangle(2.0, 10.0))
                .build(),
        )
        .unwrap();

    world.step_ms(30);

    let velocity = velocity_of(&world, ball);
    assert_relative_eq!(velocity.x, -100.0, epsilon = 1e-9);
    assert_relative_eq!(velocity.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(world.object(ball).unwrap().position.x, 0.0, epsilon = 1e-9);
    assert_eq!(world.object(wall).unwrap().position, Point::new(2.5, 5.0, 0.0));
}

#[test]
fn resting_overlap_is_expunged_symmetrically() {
    let mut world = PhysicsWorld::default();
    let a = world.spawn(mob(0.0, 0.0)).unwrap();
    let b = world.spawn(mob(1.0, 0.0)).unwrap();

    world.step_ms(10);

    let xa = world.object(a).unwrap().position.x;
    let xb = world.object(b).unwrap().position.x;
    let tolerance = world.config().expunge_tolerance;
    assert_relative_eq!(xa, -(1.0 + tolerance) / 2.0, epsilon = 1e-9);
    assert_relative_eq!(xb, 1.0 + (1.0 + tolerance) / 2.0, epsilon = 1e-9);
    assert!(xb - xa > 2.0);
}

#[test]
fn trigger_notifies_only_the_solid_party() {
    let zone_hits = CollisionRecorder::new("zone");
    let bolt_hits = CollisionRecorder::new("bolt");

    let mut world = PhysicsWorld::default();
    world
        .spawn(
            PhysicsObject::builder()
                .kind(CollisionType::Passive)
                .shape(Shape::circle(2.0))
                .listener(zone_hits.clone())
                .build(),
        )
        .unwrap();
    let bolt = world
        .spawn(
            PhysicsObject::builder()
                .kind(CollisionType::Projectile)
                .position(0.5, 0.0)
                .shape(Shape::circle(1.0))
                .velocity(1.0, DVec2::new(1.0, 0.0))
                .listener(bolt_hits.clone())
                .build(),
        )
        .unwrap();

    world.step_ms(10);

    assert_eq!(bolt_hits.hits(), vec![Some("zone".to_owned())]);
    assert_eq!(zone_hits.count(), 0);
    assert_relative_eq!(velocity_of(&world, bolt).x, 1.0);
}

#[test]
fn colliding_pair_notifies_both_listeners() {
    let left = CollisionRecorder::new("left");
    let right = CollisionRecorder::new("right");

    let mut world = PhysicsWorld::default();
    let mut a = mob(-3.0, 100.0);
    a.listener = Some(left.clone());
    let mut b = mob(3.0, -100.0);
    b.listener = Some(right.clone());
    world.spawn(a).unwrap();
    world.spawn(b).unwrap();

    world.step_ms(30);

    assert_eq!(left.hits(), vec![Some("right".to_owned())]);
    assert_eq!(right.hits(), vec![Some("left".to_owned())]);
}

#[test]
fn matrix_controls_which_types_collide() {
    let projectile = |x: f64, vx: f64| {
        let mut object = mob(x, vx);
        object.kind = CollisionType::Projectile;
        object
    };

    let mut world = PhysicsWorld::default();
    let a = world.spawn(projectile(-3.0, 100.0)).unwrap();
    world.spawn(projectile(3.0, -100.0)).unwrap();
    world.step_ms(30);
    assert_relative_eq!(velocity_of(&world, a).x, 100.0);

    let mut world = PhysicsWorld::default();
    world
        .matrix_mut()
        .set(CollisionType::Projectile, CollisionType::Projectile, true);
    let a = world.spawn(projectile(-3.0, 100.0)).unwrap();
    world.spawn(projectile(3.0, -100.0)).unwrap();
    world.step_ms(30);
    assert_relative_eq!(velocity_of(&world, a).x, -100.0, epsilon = 1e-9);
}

#[test]
fn bodies_on_different_planes_pass_through() {
    let mut world = PhysicsWorld::default();
    let mut high = mob(3.0, -100.0);
    high.position.z = 5.0;
    let a = world.spawn(mob(-3.0, 100.0)).unwrap();
    let b = world.spawn(high).unwrap();

    world.step_ms(30);

    assert_relative_eq!(velocity_of(&world, a).x, 100.0);
    assert_relative_eq!(velocity_of(&world, b).x, -100.0);
    assert_eq!(world.profile().candidate_pairs, 0);
}

#[test]
fn field_accelerates_bodies_toward_its_focus() {
    let mut world = PhysicsWorld::new(EngineConfig {
        max_delay_ms: 1000,
        ..EngineConfig::default()
    });
    world
        .spawn(
            PhysicsObject::builder()
                .field(Field::new(Boundary::new(Shape::circle(20.0)), ConstantRate::new(5.0)))
                .build(),
        )
        .unwrap();
    let body = world
        .spawn(
            PhysicsObject::builder()
                .position(10.0, 0.0)
                .motion(Motion::default())
                .build(),
        )
        .unwrap();

    world.step_ms(1000);

    let velocity = velocity_of(&world, body);
    assert_relative_eq!(velocity.x, -5.0, epsilon = 1e-9);
    assert_relative_eq!(velocity.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(world.object(body).unwrap().position.x, 5.0, epsilon = 1e-9);
}

#[test]
fn field_outside_reach_does_nothing() {
    let mut world = PhysicsWorld::default();
    world
        .spawn(
            PhysicsObject::builder()
                .field(Field::new(Boundary::new(Shape::circle(2.0)), UniformField::new(DVec2::new(0.0, -9.8))))
                .build(),
        )
        .unwrap();
    let far = world
        .spawn(
            PhysicsObject::builder()
                .position(10.0, 0.0)
                .shape(Shape::circle(1.0))
                .motion(Motion::default())
                .build(),
        )
        .unwrap();

    world.step_ms(30);
    assert_eq!(velocity_of(&world, far), DVec2::ZERO);
}

#[test]
fn field_never_acts_on_its_owner() {
    let mut world = PhysicsWorld::default();
    let owner = world
        .spawn(
            PhysicsObject::builder()
                .position(1.0, 1.0)
                .shape(Shape::circle(1.0))
                .motion(Motion::default())
                .field(Field::new(Boundary::new(Shape::circle(5.0)), UniformField::new(DVec2::new(10.0, 0.0))))
                .build(),
        )
        .unwrap();

    world.step_ms(30);
    assert_eq!(velocity_of(&world, owner), DVec2::ZERO);
}

#[test]
fn removed_objects_stop_simulating() {
    let mut world = PhysicsWorld::default();
    let id = world.spawn(mob(0.0, 100.0)).unwrap();
    world.step_ms(10);
    let x = world.object(id).unwrap().position.x;
    assert_relative_eq!(x, 1.0, epsilon = 1e-9);

    world.remove(id).unwrap();
    world.step_ms(10);
    assert_relative_eq!(world.object(id).unwrap().position.x, x);

    world.add(id).unwrap();
    world.step_ms(10);
    assert_relative_eq!(world.object(id).unwrap().position.x, 2.0, epsilon = 1e-9);
}

#[test]
fn released_slots_reject_old_ids() {
    let mut world = PhysicsWorld::default();
    let id = world.spawn(mob(0.0, 0.0)).unwrap();
    let object = world.release(id).unwrap();
    assert!(!object.is_active());
    assert!(world.object(id).is_none());
    assert_eq!(world.remove(id), Err(PhysicsError::UnknownObject(id)));

    let reused = world.insert(mob(0.0, 0.0));
    assert_ne!(reused, id);
}

#[test]
fn engine_wrapper_drives_its_world() {
    let mut engine = PhysicsEngine::new();
    let world = engine.initialize(EngineConfig::default());
    let id = world.spawn(mob(0.0, 100.0)).unwrap();

    engine.update(0.0105);
    let x = engine.world().unwrap().object(id).unwrap().position.x;
    assert_relative_eq!(x, 1.0, epsilon = 1e-9);

    engine.clear_objects();
    assert!(engine.world().unwrap().is_empty());
}

#[test]
fn ball_reaching_a_wall_over_several_ticks_bounces_back() {
    let mut world = PhysicsWorld::default();
    let ball = world.spawn(mob(0.0, 10.0)).unwrap();
    let wall_boundary = Boundary::new(Shape::rectangle(2.0, 10.0));
    let wall_at = Point::new(2.5, 5.0, 0.0);
    world
        .spawn(
            PhysicsObject::builder()
                .kind(CollisionType::VisibleWall)
                .position(wall_at.x, wall_at.y)
                .boundary(wall_boundary.clone())
                .build(),
        )
        .unwrap();

    for _ in 0..20 {
        world.step_ms(30);
    }

    let velocity = velocity_of(&world, ball);
    assert_relative_eq!(velocity.x, -10.0, epsilon = 1e-9);

    let ball_object = world.object(ball).unwrap();
    let ball_boundary = ball_object.boundary.as_ref().unwrap();
    assert!(!ball_boundary.intersects(ball_object.position, &wall_boundary, wall_at));
    assert!(ball_object.position.x + 1.0 <= 2.5 + world.config().expunge_tolerance);
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Circle,
    Square,
    Pentagon,
}

const KINDS: [Kind; 3] = [Kind::Circle, Kind::Square, Kind::Pentagon];

/// A body of roughly unit radius whose middle sits at `(x, 0)`.
fn body(kind: Kind, x: f64, motion: Option<Motion>) -> PhysicsObject {
    let (shape, anchor) = match kind {
        Kind::Circle => (Shape::circle(1.0), DVec2::new(x, 0.0)),
        // Rectangles hang below and right of their anchor.
        Kind::Square => (Shape::rectangle(2.0, 2.0), DVec2::new(x - 1.0, 1.0)),
        Kind::Pentagon => {
            let vertices = (0..5)
                .map(|i| DVec2::from_angle(FRAC_PI_2 + i as f64 * TAU / 5.0))
                .collect();
            (Shape::polygon(vertices), DVec2::new(x, 0.0))
        }
    };
    let mut builder = PhysicsObject::builder()
        .position(anchor.x, anchor.y)
        .shape(shape);
    if let Some(motion) = motion {
        builder = builder.motion(motion);
    }
    builder.build()
}

fn still_overlapping(world: &PhysicsWorld, a: ObjectId, b: ObjectId) -> bool {
    let (a, b) = (world.object(a).unwrap(), world.object(b).unwrap());
    a.boundary
        .as_ref()
        .unwrap()
        .intersects(a.position, b.boundary.as_ref().unwrap(), b.position)
}

#[test]
fn head_on_collisions_exchange_velocities_for_every_shape_pair() {
    for kind_a in KINDS {
        for kind_b in KINDS {
            let mut world = PhysicsWorld::default();
            let a = world
                .spawn(body(kind_a, -3.0, Some(Motion::new(1.0, DVec2::new(100.0, 0.0)))))
                .unwrap();
            let b = world
                .spawn(body(kind_b, 3.0, Some(Motion::new(1.0, DVec2::new(-100.0, 0.0)))))
                .unwrap();

            world.step_ms(30);

            let (va, vb) = (velocity_of(&world, a), velocity_of(&world, b));
            let pair = format!("{kind_a:?}/{kind_b:?}");
            assert_eq!(world.profile().collisions, 1, "{pair}");
            assert!(!still_overlapping(&world, a, b), "{pair}");
            assert!(va.x < 0.0 && vb.x > 0.0, "{pair}: {va} {vb}");
            assert_relative_eq!((va + vb).length(), 0.0, epsilon = 1e-9);
            assert_relative_eq!(va.length_squared() + vb.length_squared(), 20_000.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn moving_body_reflects_off_static_body_for_every_shape_pair() {
    for kind_a in KINDS {
        for kind_b in KINDS {
            let mut world = PhysicsWorld::default();
            let a = world
                .spawn(body(kind_a, -3.0, Some(Motion::new(1.0, DVec2::new(100.0, 0.0)))))
                .unwrap();
            let b = world.spawn(body(kind_b, 1.5, None)).unwrap();

            world.step_ms(30);

            let velocity = velocity_of(&world, a);
            let pair = format!("{kind_a:?}/{kind_b:?}");
            assert!(!still_overlapping(&world, a, b), "{pair}");
            assert!(velocity.x < 0.0, "{pair}: {velocity}");
            assert_relative_eq!(velocity.length(), 100.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn resting_overlaps_are_expunged_for_every_shape_pair() {
    for kind_a in KINDS {
        for kind_b in KINDS {
            for b_moves in [true, false] {
                let mut world = PhysicsWorld::default();
                let a = world.spawn(body(kind_a, 0.0, Some(Motion::default()))).unwrap();
                let b_motion = b_moves.then(Motion::default);
                let b = world.spawn(body(kind_b, 1.2, b_motion)).unwrap();
                let b_start = world.object(b).unwrap().position;

                world.step_ms(10);

                let pair = format!("{kind_a:?}/{kind_b:?} b_moves={b_moves}");
                assert_eq!(world.profile().collisions, 1, "{pair}");
                assert!(!still_overlapping(&world, a, b), "{pair}");
                if !b_moves {
                    assert_eq!(world.object(b).unwrap().position, b_start, "{pair}");
                }
            }
        }
    }
}
