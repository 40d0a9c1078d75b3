//! # tactus-mesh
//!
//! Versioned triangle mesh storage with Structure-of-Arrays (SoA) layout.
//!
//! ## Key Types
//!
//! - [`Mesh`] — The core mesh type. Stores per-vertex channels and
//!   triangle topology in contiguous SoA buffers, with a revision
//!   counter bumped on every edit so collision structures can detect
//!   staleness.
//! - [`GeometryStore`] — Reader-snapshot/writer-commit wrapper. The
//!   servo thread takes `Arc<Mesh>` snapshots; the edit thread commits
//!   copies. Neither blocks the other for longer than a pointer swap.
//! - Procedural generators for scenario meshes (quad grids, UV spheres).

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod store;

pub use mesh::Mesh;
pub use store::GeometryStore;
