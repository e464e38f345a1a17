//! Exact pairwise tests between placed shapes.
//!
//! Intersection dispatches on the shape pair. Circles and rectangles use their
//! closed-form tests; anything involving a polygon goes through a bounding
//! circle rejection and then the separating axis theorem. Normals and
//! penetration depth share one rule for every pair.

use glam::DVec2;

use crate::collision::shapes::{Circle, EdgeProjection, Placed, Shape};
use crate::core::types::Interval;
use crate::utils::math::{angle_of, closest_point_on_segment, segments_intersect};

const DEGENERATE_EPSILON: f64 = 1e-12;

/// Whether two placed shapes overlap. Touching shapes do not.
pub fn intersects(a: Placed<'_>, b: Placed<'_>) -> bool {
    match (a.shape, b.shape) {
        (Shape::Circle(ca), Shape::Circle(cb)) => circle_circle(ca, a.center, cb, b.center),
        (Shape::Circle(circle), Shape::Rectangle(_)) => circle_rectangle(circle, a.center, b),
        (Shape::Rectangle(_), Shape::Circle(circle)) => circle_rectangle(circle, b.center, a),
        (Shape::Rectangle(_), Shape::Rectangle(_)) => rectangle_rectangle(a, b),
        (Shape::Polygon(_), _) => polygon_any(a, b),
        (_, Shape::Polygon(_)) => polygon_any(b, a),
    }
}

fn circle_circle(a: &Circle, ca: DVec2, b: &Circle, cb: DVec2) -> bool {
    let r = a.radius() + b.radius();
    ca.distance_squared(cb) < r * r
}

fn circle_rectangle(circle: &Circle, center: DVec2, rect: Placed<'_>) -> bool {
    let (x, y) = rect.extents();
    let clamped = DVec2::new(center.x.clamp(x.start, x.end), center.y.clamp(y.start, y.end));
    if clamped == center {
        return true;
    }
    center.distance_squared(clamped) < circle.radius() * circle.radius()
}

fn rectangle_rectangle(a: Placed<'_>, b: Placed<'_>) -> bool {
    let (ax, ay) = a.extents();
    let (bx, by) = b.extents();
    !(ay.start >= by.end || ay.end <= by.start || ax.end <= bx.start || ax.start >= bx.end)
}

fn polygon_any(polygon: Placed<'_>, other: Placed<'_>) -> bool {
    let Some((bounding, center)) = polygon.bounding_circle() else {
        return false;
    };
    let near = match other.shape {
        Shape::Circle(circle) => circle_circle(&bounding, center, circle, other.center),
        Shape::Rectangle(_) => circle_rectangle(&bounding, center, other),
        Shape::Polygon(_) => match other.bounding_circle() {
            Some((other_bounding, other_center)) => {
                circle_circle(&bounding, center, &other_bounding, other_center)
            }
            None => true,
        },
    };
    near && !separated(polygon, other)
}

/// Runs the separating axis test over both shapes' edge normals. A shape's
/// own edges use its cached projections. When one side is a circle, the axis
/// from the polygon's nearest vertex to the circle's center is tested as well.
fn separated(polygon: Placed<'_>, other: Placed<'_>) -> bool {
    let usable = |edge: &&EdgeProjection| edge.axis.length_squared() > DEGENERATE_EPSILON;
    let apart = |a: Interval, b: Interval| a.distance(&b) >= 0.0;

    if polygon
        .edges()
        .iter()
        .filter(usable)
        .any(|edge| apart(edge.placed(polygon.center), other.project(edge.axis)))
    {
        return true;
    }
    if other
        .edges()
        .iter()
        .filter(usable)
        .any(|edge| apart(polygon.project(edge.axis), edge.placed(other.center)))
    {
        return true;
    }

    if let Shape::Circle(_) = other.shape {
        let nearest = polygon
            .local_points()
            .iter()
            .map(|v| *v + polygon.center)
            .min_by(|p, q| {
                p.distance_squared(other.center)
                    .total_cmp(&q.distance_squared(other.center))
            });
        if let Some(vertex) = nearest {
            let axis = other.center - vertex;
            return axis.length_squared() > DEGENERATE_EPSILON
                && apart(polygon.project(axis), other.project(axis));
        }
    }
    false
}

/// Whether `point` lies strictly inside the shape.
pub fn contains_point(shape: Placed<'_>, point: DVec2) -> bool {
    match shape.shape {
        Shape::Circle(circle) => shape.center.distance_squared(point) < circle.radius() * circle.radius(),
        Shape::Rectangle(_) => {
            let (x, y) = shape.extents();
            point.x > x.start && point.x < x.end && point.y > y.start && point.y < y.end
        }
        Shape::Polygon(_) => shape.edges().iter().all(|edge| {
            let interval = edge.placed(shape.center);
            let d = point.dot(edge.axis);
            d > interval.start && d < interval.end
        }),
    }
}

/// Whether the segment `start..end` touches the shape.
pub fn intersects_segment(shape: Placed<'_>, start: DVec2, end: DVec2) -> bool {
    match shape.shape {
        Shape::Circle(circle) => {
            let (closest, _) = closest_point_on_segment(shape.center, start, end);
            shape.center.distance_squared(closest) < circle.radius() * circle.radius()
        }
        _ => {
            if contains_point(shape, start) || contains_point(shape, end) {
                return true;
            }
            let outline = shape.outline();
            (0..outline.len()).any(|i| {
                let next = outline[(i + 1) % outline.len()];
                segments_intersect(start, end, outline[i], next)
            })
        }
    }
}

/// Closed edges of a placed shape with normals oriented away from its centroid.
fn outward_edges(shape: &Placed<'_>, outline: &[DVec2]) -> Vec<(DVec2, DVec2, DVec2)> {
    if outline.len() < 2 {
        return Vec::new();
    }
    let centroid = shape.centroid();
    (0..outline.len())
        .map(|i| {
            let e0 = outline[i];
            let e1 = outline[(i + 1) % outline.len()];
            let along = e1 - e0;
            let mut normal = DVec2::new(along.y, -along.x);
            if normal.dot((e0 + e1) * 0.5 - centroid) < 0.0 {
                normal = -normal;
            }
            (e0, e1, normal)
        })
        .collect()
}

/// Direction of the collision from `a` toward `b`, as a vector.
///
/// The closest pair of features decides it. A vertex of `a` nearest to the
/// inside of an edge of `b` yields the reversed outward normal of that edge; a
/// vertex of `b` nearest to the inside of an edge of `a` yields that edge's
/// outward normal; two vertices yield the vector between them. A vanishing
/// result falls back to the vector between centroids.
pub fn normal_vector(a: Placed<'_>, b: Placed<'_>) -> DVec2 {
    let outline_a = a.outline();
    let outline_b = b.outline();
    let edges_a = outward_edges(&a, &outline_a);
    let edges_b = outward_edges(&b, &outline_b);

    let mut best_distance = f64::INFINITY;
    let mut best = DVec2::ZERO;
    let mut consider = |distance: f64, direction: DVec2| {
        if distance < best_distance {
            best_distance = distance;
            best = direction;
        }
    };

    for &p in &outline_a {
        for &q in &outline_b {
            consider(p.distance_squared(q), q - p);
        }
        for &(e0, e1, normal) in &edges_b {
            let (q, interior) = closest_point_on_segment(p, e0, e1);
            let direction = if interior { -normal } else { q - p };
            consider(p.distance_squared(q), direction);
        }
    }
    for &q in &outline_b {
        for &(e0, e1, normal) in &edges_a {
            let (p, interior) = closest_point_on_segment(q, e0, e1);
            let direction = if interior { normal } else { q - p };
            consider(p.distance_squared(q), direction);
        }
    }

    if best.length_squared() > DEGENERATE_EPSILON {
        best
    } else {
        b.centroid() - a.centroid()
    }
}

/// Angle in `[0, 2π)` of the collision normal pointing from `a` toward `b`.
pub fn normal_of_collision(a: Placed<'_>, b: Placed<'_>) -> f64 {
    angle_of(normal_vector(a, b))
}

/// How far `a` reaches into `b` along the unit `normal` pointing from `a`
/// toward `b`. Positive values mean overlap along that direction.
pub fn penetration_depth(a: Placed<'_>, b: Placed<'_>, normal: DVec2) -> f64 {
    a.project(normal).end - b.project(normal).start
}
