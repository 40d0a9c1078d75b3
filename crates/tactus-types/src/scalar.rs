//! Scalar type alias for the haptic core.
//!
//! Using `f32` to match the `glam` vector types used throughout.
//! This alias makes it easy to experiment with `f64` precision if needed.

/// The floating-point type used throughout the haptic core.
pub type Scalar = f32;
