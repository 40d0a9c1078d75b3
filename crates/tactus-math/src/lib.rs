//! # tactus-math
//!
//! Geometric primitives for the Tactus haptic core.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat3`, etc.)
//! - Axis-aligned bounding boxes with segment/box intersection tests
//! - Constraint planes with signed distance and projection
//! - Point/segment/sphere–triangle proximity and intersection tests

pub mod aabb;
pub mod plane;
pub mod triangle;

pub use aabb::Aabb;
pub use plane::Plane;
pub use triangle::{closest_point_on_triangle, face_normal, segment_triangle_intersection};

// Re-export glam types as the canonical math types for Tactus.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
