//! # tactus-collision
//!
//! Collision detection over triangle meshes for haptic rendering.
//!
//! Two detector strategies behind one trait:
//! 1. **Brute force** — O(n) sweep over every alive triangle.
//!    Correctness baseline, and the better choice for small or
//!    per-tick-edited meshes.
//! 2. **Bounding volume hierarchy** — axis-aligned box tree, rebuilt
//!    wholesale when the mesh revision changes, pruned traversal.
//!
//! Both append [`CollisionEvent`]s to a [`CollisionRecorder`] in
//! deterministic order; a [`CollisionScene`] applies per-object
//! visibility/haptic filters and merges recorders across objects.

pub mod brute;
pub mod bvh;
pub mod detector;
pub mod event;
pub mod probe;
pub mod scene;
pub mod settings;

pub use brute::BruteForce;
pub use bvh::Bvh;
pub use detector::CollisionDetector;
pub use event::{CollisionEvent, CollisionRecorder};
pub use probe::Probe;
pub use scene::{CollisionScene, SceneObject};
pub use settings::CollisionSettings;
