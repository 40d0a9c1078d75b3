//! Probe shapes for collision queries.
//!
//! A probe describes the tool geometry (or its motion) being tested
//! against a mesh: a static point, a swept segment (the proxy's path
//! toward the device position), or a sphere.

use tactus_math::{Aabb, Vec3};

/// The query shape for one collision call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    /// A static point. Hits are the triangles within `max_distance`.
    Point(Vec3),
    /// A swept segment from `start` to `end`. Hits are triangles the
    /// segment passes through.
    Segment { start: Vec3, end: Vec3 },
    /// A sphere of `radius` around `center`.
    Sphere { center: Vec3, radius: f32 },
}

impl Probe {
    /// The probe's origin: the reference point distances are measured from.
    pub fn origin(&self) -> Vec3 {
        match *self {
            Probe::Point(p) => p,
            Probe::Segment { start, .. } => start,
            Probe::Sphere { center, .. } => center,
        }
    }

    /// Tight bounding box of the probe itself (no query margin).
    pub fn aabb(&self) -> Aabb {
        match *self {
            Probe::Point(p) => Aabb::from_point(p),
            Probe::Segment { start, end } => {
                let mut b = Aabb::from_point(start);
                b.expand_point(end);
                b
            }
            Probe::Sphere { center, radius } => Aabb::new(
                center - Vec3::splat(radius),
                center + Vec3::splat(radius),
            ),
        }
    }

    /// True for probes that cannot produce a hit (zero-length sweep is
    /// still valid — it degenerates to a point test — but non-finite
    /// coordinates are not).
    pub fn is_degenerate(&self) -> bool {
        let finite = |v: Vec3| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();
        match *self {
            Probe::Point(p) => !finite(p),
            Probe::Segment { start, end } => !finite(start) || !finite(end),
            Probe::Sphere { center, radius } => !finite(center) || !radius.is_finite() || radius < 0.0,
        }
    }
}
