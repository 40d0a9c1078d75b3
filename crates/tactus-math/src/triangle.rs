//! Point/segment–triangle proximity and intersection tests.
//!
//! These are the per-triangle kernels both collision detectors share:
//! the brute-force detector calls them for every triangle, the
//! hierarchy detector only within leaves.

use glam::Vec3;
use tactus_types::constants::DEGENERATE_AREA_THRESHOLD;

/// Closest point on a triangle together with its barycentric coordinates.
#[derive(Debug, Clone, Copy)]
pub struct TrianglePoint {
    /// The closest point on the triangle (vertex, edge, or interior).
    pub point: Vec3,
    /// Barycentric coordinates `[u, v, w]` of the closest point
    /// with respect to `(a, b, c)`.
    pub barycentric: [f32; 3],
}

/// A segment–triangle intersection.
#[derive(Debug, Clone, Copy)]
pub struct SegmentHit {
    /// Parameter along the segment, in `[0, 1]`.
    pub t: f32,
    /// The intersection point.
    pub point: Vec3,
}

/// Unit face normal of triangle `(a, b, c)`, following winding order.
///
/// Returns `None` for degenerate (near-zero-area) triangles.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    let n = (b - a).cross(c - a);
    let len = n.length();
    if len < DEGENERATE_AREA_THRESHOLD {
        return None;
    }
    Some(n / len)
}

/// Closest point on triangle `(a, b, c)` to point `p`.
///
/// Voronoi-region walk: classifies `p` against the triangle's vertex,
/// edge, and face regions, returning the exact closest feature point.
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> TrianglePoint {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    // Vertex region A
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return TrianglePoint {
            point: a,
            barycentric: [1.0, 0.0, 0.0],
        };
    }

    // Vertex region B
    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return TrianglePoint {
            point: b,
            barycentric: [0.0, 1.0, 0.0],
        };
    }

    // Edge region AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return TrianglePoint {
            point: a + ab * v,
            barycentric: [1.0 - v, v, 0.0],
        };
    }

    // Vertex region C
    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return TrianglePoint {
            point: c,
            barycentric: [0.0, 0.0, 1.0],
        };
    }

    // Edge region AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return TrianglePoint {
            point: a + ac * w,
            barycentric: [1.0 - w, 0.0, w],
        };
    }

    // Edge region BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return TrianglePoint {
            point: b + (c - b) * w,
            barycentric: [0.0, 1.0 - w, w],
        };
    }

    // Interior (face region)
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    TrianglePoint {
        point: a + ab * v + ac * w,
        barycentric: [1.0 - v - w, v, w],
    }
}

/// Intersection of the segment `start → end` with triangle `(a, b, c)`.
///
/// Möller–Trumbore restricted to the segment's parameter range.
/// Hits on either face of the triangle are reported (the caller
/// orients the contact normal). Returns `None` for misses and
/// degenerate triangles.
pub fn segment_triangle_intersection(
    start: Vec3,
    end: Vec3,
    a: Vec3,
    b: Vec3,
    c: Vec3,
) -> Option<SegmentHit> {
    let dir = end - start;
    let ab = b - a;
    let ac = c - a;

    let pvec = dir.cross(ac);
    let det = ab.dot(pvec);
    if det.abs() < DEGENERATE_AREA_THRESHOLD {
        return None; // Segment parallel to triangle plane, or degenerate triangle
    }
    let inv_det = 1.0 / det;

    let tvec = start - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(-f32::EPSILON..=1.0 + f32::EPSILON).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(ab);
    let v = dir.dot(qvec) * inv_det;
    if v < -f32::EPSILON || u + v > 1.0 + f32::EPSILON {
        return None;
    }

    let t = ac.dot(qvec) * inv_det;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    Some(SegmentHit {
        t,
        point: start + dir * t,
    })
}
