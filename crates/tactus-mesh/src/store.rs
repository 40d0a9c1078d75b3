//! Reader-snapshot / writer-commit geometry store.
//!
//! The servo thread must never stall behind a mesh edit. Readers take
//! an `Arc<Mesh>` snapshot under a lock held only for the pointer
//! clone; writers prepare a full copy off to the side and publish it
//! with a pointer swap. A snapshot stays valid (and immutable) for as
//! long as the reader holds it, even across concurrent commits.

use std::sync::{Arc, RwLock};

use tactus_types::TactusResult;

use crate::mesh::Mesh;

/// Shared geometry store with copy-on-write commits.
///
/// The collision layer reads snapshots once per servo tick; the
/// update/graphics thread applies edits through [`GeometryStore::commit`].
pub struct GeometryStore {
    shared: RwLock<Arc<Mesh>>,
}

impl GeometryStore {
    /// Creates a store publishing `mesh` as the first snapshot.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            shared: RwLock::new(Arc::new(mesh)),
        }
    }

    /// Returns the latest published snapshot.
    ///
    /// The lock is held only for the `Arc` clone.
    pub fn snapshot(&self) -> Arc<Mesh> {
        self.shared
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the revision of the latest published snapshot.
    pub fn revision(&self) -> u64 {
        self.snapshot().revision()
    }

    /// Applies `edit` to a copy of the current mesh and publishes it.
    ///
    /// On success the copy is compacted (dead triangles dropped), face
    /// normals are refreshed, and the snapshot pointer is swapped. If
    /// `edit` fails nothing is published and the error propagates to
    /// the caller — readers never observe a half-applied edit.
    pub fn commit<R>(&self, edit: impl FnOnce(&mut Mesh) -> TactusResult<R>) -> TactusResult<R> {
        let mut copy = Mesh::clone(&self.snapshot());
        let out = edit(&mut copy)?;
        copy.compact();
        copy.refresh_face_normals();

        let mut guard = self
            .shared
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(copy);
        Ok(out)
    }
}
