//! Constraint planes.
//!
//! A plane is stored in Hessian normal form: `normal · p = offset`.
//! The positive half-space (`signed_distance > 0`) is the free side;
//! the proxy algorithm keeps its proxy on or above every active plane.

use glam::Vec3;

/// An oriented plane in Hessian normal form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal. Points into the free half-space.
    pub normal: Vec3,
    /// Distance from the origin along the normal.
    pub offset: f32,
}

impl Plane {
    /// Creates a plane through `point` with the given unit `normal`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            offset: normal.dot(point),
        }
    }

    /// Signed distance from `p` to the plane. Positive on the free side.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) - self.offset
    }

    /// Orthogonal projection of `p` onto the plane.
    #[inline]
    pub fn project(&self, p: Vec3) -> Vec3 {
        p - self.normal * self.signed_distance(p)
    }

    /// Returns the plane with its orientation flipped.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }
}
