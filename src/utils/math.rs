//! Planar math helpers layered on top of `glam`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

/// Counter-clockwise angle of `v` from the positive x-axis, in `[0, 2π)`.
///
/// A vector with a zero x component maps to straight up or straight down
/// without consulting `atan2`, so the zero vector reports `π/2`.
pub fn angle_of(v: DVec2) -> f64 {
    if v.x == 0.0 {
        return if v.y < 0.0 { PI + FRAC_PI_2 } else { FRAC_PI_2 };
    }
    wrap_angle(v.y.atan2(v.x))
}

/// Unit vector pointing along `angle`.
pub fn unit(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Wraps an arbitrary angle into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Closest point to `p` on segment `a..b`, plus whether the projection fell
/// strictly inside the segment (as opposed to being clamped to an endpoint).
///
/// A zero-length segment divides by zero and clamps to `a`.
pub fn closest_point_on_segment(p: DVec2, a: DVec2, b: DVec2) -> (DVec2, bool) {
    let ab = b - a;
    let r = (p - a).dot(ab) / ab.length_squared();
    if (0.0..=1.0).contains(&r) {
        (a + ab * r, true)
    } else {
        let dist_a = p.distance_squared(a);
        let dist_b = p.distance_squared(b);
        if dist_b < dist_a {
            (b, false)
        } else {
            (a, false)
        }
    }
}

/// Whether the closed segments `p1..p2` and `q1..q2` share at least one point.
pub fn segments_intersect(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
