//! Convex planar shapes.
//!
//! Geometry is stored relative to the shape's anchor point. The world position
//! of that anchor belongs to the owning object and is passed in whenever a
//! shape is placed, so moving an object never touches its shape.

use glam::DVec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::types::Interval;

/// Most vertices a [`Polygon`] may have.
pub const MAX_POLYGON_VERTICES: usize = 5;

/// Vertices substituted for polygon input with an unsupported vertex count.
pub const DEFAULT_TRIANGLE: [DVec2; 3] = [
    DVec2::new(0.0, 0.0),
    DVec2::new(0.0, 1.0),
    DVec2::new(1.0, 0.0),
];

const CIRCLE_OUTLINE: [DVec2; 1] = [DVec2::ZERO];

/// An edge normal together with the shape's local projection onto it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeProjection {
    pub axis: DVec2,
    pub min: f64,
    pub max: f64,
}

impl EdgeProjection {
    fn from_edges(vertices: &[DVec2]) -> Vec<EdgeProjection> {
        (0..vertices.len())
            .map(|i| {
                let p1 = vertices[i];
                let p2 = vertices[(i + 1) % vertices.len()];
                let axis = DVec2::new(p2.y - p1.y, p1.x - p2.x);
                let (min, max) = project_points(vertices.iter().copied(), axis);
                EdgeProjection { axis, min, max }
            })
            .collect()
    }

    /// The cached projection shifted to a world anchor.
    pub fn placed(&self, center: DVec2) -> Interval {
        let offset = center.dot(self.axis);
        Interval::new(self.min + offset, self.max + offset)
    }
}

fn project_points(points: impl Iterator<Item = DVec2>, axis: DVec2) -> (f64, f64) {
    points.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
        let d = p.dot(axis);
        (min.min(d), max.max(d))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.max(0.0);
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// With anchor `(x, y)` the rectangle spans `x..x + width` horizontally and
/// `y - height..y` vertically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    width: f64,
    height: f64,
    corners: [DVec2; 4],
    edges: Vec<EdgeProjection>,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Self {
        let mut rectangle = Self {
            width: 0.0,
            height: 0.0,
            corners: [DVec2::ZERO; 4],
            edges: Vec::new(),
        };
        rectangle.resize(width, height);
        rectangle
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Changes the size and rebuilds the cached corners and edge projections.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.corners = [
            DVec2::new(0.0, 0.0),
            DVec2::new(self.width, 0.0),
            DVec2::new(self.width, -self.height),
            DVec2::new(0.0, -self.height),
        ];
        self.edges = EdgeProjection::from_edges(&self.corners);
    }

    /// Corners relative to the anchor, clockwise from the anchor.
    pub fn corners(&self) -> &[DVec2; 4] {
        &self.corners
    }

    pub fn edges(&self) -> &[EdgeProjection] {
        &self.edges
    }

    /// `(left, right, bottom, top)` with the anchor at `center`.
    pub fn bounds(&self, center: DVec2) -> (f64, f64, f64, f64) {
        (
            center.x,
            center.x + self.width,
            center.y - self.height,
            center.y,
        )
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Convex polygon of three to five vertices relative to its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<DVec2>,
    bounding_radius: f64,
    min: DVec2,
    max: DVec2,
    edges: Vec<EdgeProjection>,
}

impl Polygon {
    /// Builds a polygon from counter-clockwise vertices.
    ///
    /// Fewer than three or more than [`MAX_POLYGON_VERTICES`] vertices are
    /// replaced by [`DEFAULT_TRIANGLE`].
    pub fn new(vertices: Vec<DVec2>) -> Self {
        let vertices = if (3..=MAX_POLYGON_VERTICES).contains(&vertices.len()) {
            vertices
        } else {
            warn!(
                "polygon with {} vertices is unsupported, substituting the default triangle",
                vertices.len()
            );
            DEFAULT_TRIANGLE.to_vec()
        };

        let bounding_radius = vertices.iter().map(|v| v.length()).fold(0.0, f64::max);
        let min = vertices.iter().copied().fold(DVec2::splat(f64::INFINITY), DVec2::min);
        let max = vertices
            .iter()
            .copied()
            .fold(DVec2::splat(f64::NEG_INFINITY), DVec2::max);
        let edges = EdgeProjection::from_edges(&vertices);

        Self {
            vertices,
            bounding_radius,
            min,
            max,
            edges,
        }
    }

    pub fn triangle(a: DVec2, b: DVec2, c: DVec2) -> Self {
        Self::new(vec![a, b, c])
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn edges(&self) -> &[EdgeProjection] {
        &self.edges
    }

    /// Radius of the circle around the center that encloses every vertex.
    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    pub fn bounding_circle(&self) -> Circle {
        Circle::new(self.bounding_radius)
    }
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new(DEFAULT_TRIANGLE.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Polygon,
}

/// Exactly one of the supported shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Circle(Circle::default())
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Rectangle> for Shape {
    fn from(rectangle: Rectangle) -> Self {
        Shape::Rectangle(rectangle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl Shape {
    pub fn circle(radius: f64) -> Self {
        Shape::Circle(Circle::new(radius))
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Shape::Rectangle(Rectangle::new(width, height))
    }

    pub fn polygon(vertices: Vec<DVec2>) -> Self {
        Shape::Polygon(Polygon::new(vertices))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Places the shape with its anchor at `center`.
    pub fn at(&self, center: DVec2) -> Placed<'_> {
        Placed::new(self, center)
    }
}

/// A shape together with the world position of its anchor.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub shape: &'a Shape,
    pub center: DVec2,
}

impl<'a> Placed<'a> {
    pub fn new(shape: &'a Shape, center: DVec2) -> Self {
        Self { shape, center }
    }

    /// Axis-aligned extents on x and y.
    pub fn extents(&self) -> (Interval, Interval) {
        let c = self.center;
        match self.shape {
            Shape::Circle(circle) => (
                Interval::new(c.x - circle.radius, c.x + circle.radius),
                Interval::new(c.y - circle.radius, c.y + circle.radius),
            ),
            Shape::Rectangle(rect) => {
                let (left, right, bottom, top) = rect.bounds(c);
                (Interval::new(left, right), Interval::new(bottom, top))
            }
            Shape::Polygon(polygon) => (
                Interval::new(c.x + polygon.min.x, c.x + polygon.max.x),
                Interval::new(c.y + polygon.min.y, c.y + polygon.max.y),
            ),
        }
    }

    /// Mean of the outline, used to orient edge normals outward.
    pub fn centroid(&self) -> DVec2 {
        match self.shape {
            Shape::Circle(_) => self.center,
            Shape::Rectangle(rect) => self.center + DVec2::new(rect.width / 2.0, -rect.height / 2.0),
            Shape::Polygon(polygon) => {
                let sum: DVec2 = polygon.vertices.iter().copied().sum();
                self.center + sum / polygon.vertices.len() as f64
            }
        }
    }

    /// Vertices relative to the anchor. A circle reports only its center.
    pub fn local_points(&self) -> &'a [DVec2] {
        match self.shape {
            Shape::Circle(_) => &CIRCLE_OUTLINE,
            Shape::Rectangle(rect) => &rect.corners,
            Shape::Polygon(polygon) => &polygon.vertices,
        }
    }

    /// World-space vertices. A circle reports only its center.
    pub fn outline(&self) -> Vec<DVec2> {
        self.local_points().iter().map(|v| *v + self.center).collect()
    }

    /// Cached edge projections; empty for circles.
    pub fn edges(&self) -> &'a [EdgeProjection] {
        match self.shape {
            Shape::Circle(_) => &[],
            Shape::Rectangle(rect) => &rect.edges,
            Shape::Polygon(polygon) => &polygon.edges,
        }
    }

    /// Projection onto an arbitrary axis. The axis need not be unit length.
    pub fn project(&self, axis: DVec2) -> Interval {
        match self.shape {
            Shape::Circle(circle) => {
                let d = self.center.dot(axis);
                let r = circle.radius * axis.length();
                Interval::new(d - r, d + r)
            }
            _ => {
                let (min, max) = project_points(self.local_points().iter().copied(), axis);
                let offset = self.center.dot(axis);
                Interval::new(min + offset, max + offset)
            }
        }
    }

    /// Bounding circle as a placed circle. Circles and rectangles return `None`.
    pub fn bounding_circle(&self) -> Option<(Circle, DVec2)> {
        match self.shape {
            Shape::Polygon(polygon) => Some((polygon.bounding_circle(), self.center)),
            _ => None,
        }
    }
}
