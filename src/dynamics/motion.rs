use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::config::{BRAKE_RATE, MAX_MASS};
use crate::core::types::Point;
use crate::utils::math::{angle_of, unit};

/// Kinematic state of a moving object.
///
/// `velocity` is the full velocity the object moves with. Part of it can be
/// owned by a controller (player input, AI steering): that part is tracked in
/// `control` so collisions and braking act only on the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    velocity: DVec3,
    control: DVec2,
    acceleration: DVec3,
    outside_acceleration: DVec3,
    mass: f64,
    locked: bool,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            velocity: DVec3::ZERO,
            control: DVec2::ZERO,
            acceleration: DVec3::ZERO,
            outside_acceleration: DVec3::ZERO,
            mass: 1.0,
            locked: false,
        }
    }
}

fn clamp_mass(mass: f64) -> f64 {
    if mass <= 0.0 {
        1.0
    } else {
        mass.min(MAX_MASS)
    }
}

impl Motion {
    pub fn new(mass: f64, velocity: DVec2) -> Self {
        Self {
            velocity: velocity.extend(0.0),
            mass: clamp_mass(mass),
            ..Self::default()
        }
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Non-positive masses become 1; masses above [`MAX_MASS`] are clamped.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = clamp_mass(mass);
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// A locked object keeps its z position no matter its z velocity.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn planar_velocity(&self) -> DVec2 {
        self.velocity.truncate()
    }

    pub fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }

    pub fn set_planar_velocity(&mut self, velocity: DVec2) {
        self.velocity.x = velocity.x;
        self.velocity.y = velocity.y;
    }

    pub fn set_velocity_mag_dir(&mut self, magnitude: f64, direction: f64) {
        self.set_planar_velocity(unit(direction) * magnitude);
    }

    pub fn velocity_direction(&self) -> f64 {
        angle_of(self.planar_velocity())
    }

    /// Planar speed.
    pub fn speed(&self) -> f64 {
        self.planar_velocity().length()
    }

    /// Stops planar motion. Control input is kept and reapplied on the next
    /// [`Motion::set_controlled_components`].
    pub fn halt(&mut self) {
        self.set_planar_velocity(DVec2::ZERO);
    }

    pub fn acceleration(&self) -> DVec3 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: DVec3) {
        self.acceleration = acceleration;
    }

    pub fn set_acceleration_mag_dir(&mut self, magnitude: f64, direction: f64) {
        let planar = unit(direction) * magnitude;
        self.acceleration.x = planar.x;
        self.acceleration.y = planar.y;
    }

    pub fn acceleration_direction(&self) -> f64 {
        angle_of(self.acceleration.truncate())
    }

    pub fn acceleration_magnitude(&self) -> f64 {
        self.acceleration.truncate().length()
    }

    pub fn outside_acceleration(&self) -> DVec3 {
        self.outside_acceleration
    }

    pub fn add_outside_acceleration(&mut self, acceleration: DVec3) {
        self.outside_acceleration += acceleration;
    }

    pub fn clear_outside_acceleration(&mut self) {
        self.outside_acceleration = DVec3::ZERO;
    }

    pub fn total_acceleration(&self) -> DVec3 {
        self.acceleration + self.outside_acceleration
    }

    pub fn controlled_components(&self) -> DVec2 {
        self.control
    }

    /// Replaces the controlled part of the velocity, keeping the rest.
    pub fn set_controlled_components(&mut self, control: DVec2) {
        let uncontrolled = self.uncontrolled_velocity();
        self.control = control;
        self.set_planar_velocity(uncontrolled + control);
    }

    /// Planar velocity minus the controlled part.
    pub fn uncontrolled_velocity(&self) -> DVec2 {
        self.planar_velocity() - self.control
    }

    /// Slows the uncontrolled part of the velocity by [`BRAKE_RATE`] over `seconds`,
    /// never reversing it.
    pub fn brake(&mut self, seconds: f64) {
        let uncontrolled = self.uncontrolled_velocity();
        let speed = uncontrolled.length();
        let slowed = (speed - BRAKE_RATE * seconds).max(0.0);
        let braked = if speed > 0.0 {
            uncontrolled * (slowed / speed)
        } else {
            DVec2::ZERO
        };
        self.set_planar_velocity(braked + self.control);
    }

    /// Applies the total acceleration over `dt` seconds and clamps the result.
    pub fn integrate_velocity(&mut self, dt: f64, max_velocity: f64) {
        self.velocity += self.total_acceleration() * dt;

        let planar = self.planar_velocity();
        if planar.length_squared() >= max_velocity * max_velocity {
            self.set_planar_velocity(unit(angle_of(planar)) * max_velocity);
        }
        self.velocity.z = self.velocity.z.clamp(-max_velocity, max_velocity);
    }

    /// Moves `position` along the current velocity for `dt` seconds.
    pub fn integrate_position(&self, position: &mut Point, dt: f64) {
        let z = position.z;
        *position += self.velocity * dt;
        if self.locked {
            position.z = z;
        }
    }

    /// Velocity then position, one tick of semi-implicit Euler.
    pub fn step(&mut self, position: &mut Point, dt: f64, max_velocity: f64) {
        self.integrate_velocity(dt, max_velocity);
        self.integrate_position(position, dt);
    }

    /// Restores the defaults for reuse.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
