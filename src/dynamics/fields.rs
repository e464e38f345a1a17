use std::fmt;

use glam::{DVec2, DVec3};

use crate::collision::shapes::Shape;
use crate::core::boundary::Boundary;
use crate::core::types::Point;
use crate::dynamics::motion::Motion;
use crate::utils::math::{angle_of, unit};

/// Acceleration rule of a field, applied to every moving object inside its area.
pub trait FieldBehavior: Send + Sync {
    /// Acceleration imparted on an object at `position` by a field focused at `focus`.
    fn acceleration(&self, focus: Point, position: Point, motion: &Motion) -> DVec3;

    /// Whether the field pulls objects toward its focus.
    fn is_attractive(&self) -> bool {
        false
    }
}

/// Constant-magnitude radial acceleration. Positive magnitudes attract toward
/// the focus, negative magnitudes repel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRate {
    pub magnitude: f64,
}

impl ConstantRate {
    pub fn new(magnitude: f64) -> Self {
        Self { magnitude }
    }
}

impl FieldBehavior for ConstantRate {
    fn acceleration(&self, focus: Point, position: Point, _motion: &Motion) -> DVec3 {
        let toward_focus = focus.truncate() - position.truncate();
        (unit(angle_of(toward_focus)) * self.magnitude).extend(0.0)
    }

    fn is_attractive(&self) -> bool {
        self.magnitude > 0.0
    }
}

/// Same acceleration everywhere in the area, e.g. wind or a conveyor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformField {
    pub acceleration: DVec3,
}

impl UniformField {
    pub fn new(acceleration: DVec2) -> Self {
        Self {
            acceleration: acceleration.extend(0.0),
        }
    }
}

impl FieldBehavior for UniformField {
    fn acceleration(&self, _focus: Point, _position: Point, _motion: &Motion) -> DVec3 {
        self.acceleration
    }
}

/// Quadratic drag resisting the direction of motion, e.g. water or mud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragField {
    pub drag_coefficient: f64,
}

impl DragField {
    pub fn new(drag_coefficient: f64) -> Self {
        Self { drag_coefficient }
    }
}

impl FieldBehavior for DragField {
    fn acceleration(&self, _focus: Point, _position: Point, motion: &Motion) -> DVec3 {
        let velocity = motion.velocity();
        let speed = velocity.length();
        if speed < 1e-6 {
            return DVec3::ZERO;
        }
        -velocity.normalize() * speed * speed * self.drag_coefficient
    }
}

/// Area of effect plus the behavior applied inside it. Both the area and the
/// focus sit at the owning object's position.
pub struct Field {
    area: Boundary,
    behavior: Box<dyn FieldBehavior>,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("area", &self.area)
            .field("attractive", &self.behavior.is_attractive())
            .finish()
    }
}

impl Field {
    pub fn new<B: FieldBehavior + 'static>(area: Boundary, behavior: B) -> Self {
        Self {
            area,
            behavior: Box::new(behavior),
        }
    }

    pub fn area(&self) -> &Boundary {
        &self.area
    }

    pub fn area_mut(&mut self) -> &mut Boundary {
        &mut self.area
    }

    pub fn behavior(&self) -> &dyn FieldBehavior {
        self.behavior.as_ref()
    }

    pub fn set_behavior<B: FieldBehavior + 'static>(&mut self, behavior: B) {
        self.behavior = Box::new(behavior);
    }

    /// Rough radius of the area. Rectangles report `(width + height) / 4`,
    /// polygons their bounding radius.
    pub fn radius(&self) -> f64 {
        match self.area.shape() {
            Shape::Circle(circle) => circle.radius(),
            Shape::Rectangle(rect) => (rect.width() + rect.height()) / 4.0,
            Shape::Polygon(polygon) => polygon.bounding_radius(),
        }
    }

    /// Whether an object at `position` is inside the area. Objects with a
    /// boundary are tested shape against shape, others as a point.
    pub fn covers(&self, focus: Point, position: Point, boundary: Option<&Boundary>) -> bool {
        match boundary {
            Some(boundary) => self.area.intersects(focus, boundary, position),
            None => self.area.contains_point(focus, position.truncate()),
        }
    }

    /// Adds the field's acceleration to `motion` if the object is inside the area.
    pub fn apply(
        &self,
        focus: Point,
        position: Point,
        boundary: Option<&Boundary>,
        motion: &mut Motion,
    ) -> bool {
        if !self.covers(focus, position, boundary) {
            return false;
        }
        let acceleration = self.behavior.acceleration(focus, position, motion);
        motion.add_outside_acceleration(acceleration);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn attractive_rate_points_at_focus() {
        let field = Field::new(Boundary::new(Shape::circle(20.0)), ConstantRate::new(5.0));
        let mut motion = Motion::default();
        assert!(field.apply(Point::ZERO, Point::new(10.0, 0.0, 0.0), None, &mut motion));
        let a = motion.outside_acceleration();
        assert_relative_eq!(a.x, -5.0);
        assert_relative_eq!(a.y, 0.0, epsilon = 1e-12);
        assert!(field.behavior().is_attractive());
    }

    #[test]
    fn repelling_rate_points_away() {
        let behavior = ConstantRate::new(-2.0);
        let a = behavior.acceleration(Point::ZERO, Point::new(0.0, 3.0, 0.0), &Motion::default());
        assert_relative_eq!(a.y, 2.0);
        assert!(!behavior.is_attractive());
    }

    #[test]
    fn objects_outside_area_are_untouched() {
        let field = Field::new(Boundary::new(Shape::circle(1.0)), UniformField::new(DVec2::X));
        let mut motion = Motion::default();
        assert!(!field.apply(Point::ZERO, Point::new(5.0, 0.0, 0.0), None, &mut motion));
        assert_eq!(motion.outside_acceleration(), DVec3::ZERO);

        let body = Boundary::new(Shape::circle(4.5));
        assert!(field.apply(Point::ZERO, Point::new(5.0, 0.0, 0.0), Some(&body), &mut motion));
        assert_eq!(motion.outside_acceleration(), DVec3::X);
    }

    #[test]
    fn drag_opposes_velocity() {
        let drag = DragField::new(0.5);
        let motion = Motion::new(1.0, DVec2::new(0.0, -4.0));
        let a = drag.acceleration(Point::ZERO, Point::ZERO, &motion);
        assert_relative_eq!(a.y, 8.0);
        assert_eq!(drag.acceleration(Point::ZERO, Point::ZERO, &Motion::default()), DVec3::ZERO);
    }

    #[test]
    fn radius_depends_on_area_shape() {
        let rect = Field::new(Boundary::new(Shape::rectangle(6.0, 2.0)), DragField::new(1.0));
        assert_relative_eq!(rect.radius(), 2.0);
    }
}
