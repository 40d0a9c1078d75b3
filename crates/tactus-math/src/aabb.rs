//! Axis-aligned bounding boxes.
//!
//! Used as the bounding volume for hierarchy nodes and probe paths.
//! An empty box (`min > max`) is the identity for `union`.

use glam::Vec3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates an empty box — the identity element for [`Aabb::union`].
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Creates a box from explicit corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates the tight box around a single point.
    pub fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Creates the tight box around a triangle.
    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            min: a.min(b).min(c),
            max: a.max(b).max(c),
        }
    }

    /// Returns true if the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns the smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grows the box in place to include `p`.
    pub fn expand_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns a box enlarged by `margin` on all sides.
    pub fn inflated(&self, margin: f32) -> Aabb {
        Aabb {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Returns the box center.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the index of the longest axis (0 = x, 1 = y, 2 = z).
    pub fn longest_axis(&self) -> usize {
        let extent = self.max - self.min;
        if extent.x >= extent.y && extent.x >= extent.z {
            0
        } else if extent.y >= extent.z {
            1
        } else {
            2
        }
    }

    /// Returns true if `p` lies inside or on the box.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Returns true if `other` lies entirely inside or on the box.
    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        if other.is_empty() {
            return true;
        }
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Returns true if the two boxes overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Slab test: returns true if the segment `start → end` passes
    /// through the box.
    pub fn intersects_segment(&self, start: Vec3, end: Vec3) -> bool {
        let dir = end - start;
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;

        for axis in 0..3 {
            let (s, d, lo, hi) = match axis {
                0 => (start.x, dir.x, self.min.x, self.max.x),
                1 => (start.y, dir.y, self.min.y, self.max.y),
                _ => (start.z, dir.z, self.min.z, self.max.z),
            };

            if d.abs() < f32::EPSILON {
                // Segment parallel to this slab — reject if outside it.
                if s < lo || s > hi {
                    return false;
                }
            } else {
                let inv = 1.0 / d;
                let mut t0 = (lo - s) * inv;
                let mut t1 = (hi - s) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return false;
                }
            }
        }

        true
    }

    /// Squared distance from `p` to the closest point of the box.
    pub fn distance_squared_to_point(&self, p: Vec3) -> f32 {
        let clamped = p.clamp(self.min, self.max);
        (p - clamped).length_squared()
    }
}
