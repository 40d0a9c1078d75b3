//! # tactus-types
//!
//! Shared types, identifiers, error types, and servo-rate constants
//! for the Tactus haptic rendering core.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Tactus crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{TactusError, TactusResult};
pub use ids::{ObjectId, PointId, TriangleId, VertexId};
pub use scalar::Scalar;
