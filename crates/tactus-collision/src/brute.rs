//! Brute-force collision detector.
//!
//! Iterates every alive triangle in index order and runs the shared
//! probe–triangle kernel. O(triangle count) per query — the
//! correctness baseline used to validate the accelerated structure,
//! and the better fallback for small or per-tick-edited meshes where
//! a rebuild would cost more than it saves.

use tactus_mesh::Mesh;
use tactus_types::{ObjectId, TactusResult};

use crate::detector::{probe_triangle, CollisionDetector};
use crate::event::CollisionRecorder;
use crate::probe::Probe;
use crate::settings::CollisionSettings;

/// Brute-force detector. Stateless — `prepare` is a no-op.
#[derive(Debug, Default)]
pub struct BruteForce;

impl BruteForce {
    /// Creates a brute-force detector.
    pub fn new() -> Self {
        Self
    }
}

impl CollisionDetector for BruteForce {
    fn prepare(&mut self, _mesh: &Mesh) -> TactusResult<()> {
        Ok(())
    }

    fn query(
        &mut self,
        object: ObjectId,
        probe: &Probe,
        mesh: &Mesh,
        settings: &CollisionSettings,
        recorder: &mut CollisionRecorder,
    ) -> TactusResult<()> {
        if probe.is_degenerate() {
            return Ok(());
        }

        // Triangle-index order keeps the event sequence deterministic.
        for t in 0..mesh.triangle_count() {
            if !mesh.is_alive(t) {
                continue;
            }
            if let Some(event) = probe_triangle(object, probe, mesh, t, settings.max_distance) {
                recorder.record(event);
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "brute_force"
    }
}
