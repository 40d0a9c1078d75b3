//! Collision detector trait and the shared per-triangle test.
//!
//! Both detector strategies run the same probe–triangle kernel; they
//! differ only in which triangles they visit. That keeps the two
//! detectors bit-identical on the triangles they both test, which the
//! differential tests rely on.

use tactus_math::triangle::{closest_point_on_triangle, segment_triangle_intersection};
use tactus_mesh::Mesh;
use tactus_types::{ObjectId, TactusResult, TriangleId};

use crate::event::{CollisionEvent, CollisionRecorder};
use crate::probe::Probe;
use crate::settings::CollisionSettings;

/// Trait for collision detection strategies.
///
/// # Implementations
/// - [`BruteForce`](crate::brute::BruteForce) — O(n) sweep, no build step
/// - [`Bvh`](crate::bvh::Bvh) — bounding volume hierarchy with pruned traversal
pub trait CollisionDetector: Send {
    /// Build or refresh acceleration data for the given snapshot.
    ///
    /// Called at a tick or edit-commit boundary, never mid-query.
    /// A no-op when the cached structure already matches the mesh
    /// revision (and always, for brute force).
    fn prepare(&mut self, mesh: &Mesh) -> TactusResult<()>;

    /// Tests `probe` against `mesh`, appending one event per hit
    /// within `settings.max_distance` to `recorder`.
    ///
    /// Events are appended in a deterministic order; the caller sorts
    /// by distance (via [`CollisionRecorder::finalize`]) when only the
    /// nearest hit is wanted. An empty mesh or degenerate probe
    /// produces no events and no error.
    fn query(
        &mut self,
        object: ObjectId,
        probe: &Probe,
        mesh: &Mesh,
        settings: &CollisionSettings,
        recorder: &mut CollisionRecorder,
    ) -> TactusResult<()>;

    /// Returns the detector strategy name.
    fn name(&self) -> &str;
}

/// Tests one alive triangle against the probe.
///
/// Returns the event to record, or `None` if the triangle is missed
/// or beyond `max_distance`.
pub(crate) fn probe_triangle(
    object: ObjectId,
    probe: &Probe,
    mesh: &Mesh,
    t: usize,
    max_distance: f32,
) -> Option<CollisionEvent> {
    let [a, b, c] = mesh.triangle_positions(t);

    let (point, distance) = match *probe {
        Probe::Point(p) => {
            let closest = closest_point_on_triangle(p, a, b, c);
            (closest.point, (p - closest.point).length())
        }
        Probe::Segment { start, end } => {
            let hit = segment_triangle_intersection(start, end, a, b, c)?;
            (hit.point, hit.t * (end - start).length())
        }
        Probe::Sphere { center, radius } => {
            let closest = closest_point_on_triangle(center, a, b, c);
            (closest.point, (center - closest.point).length() - radius)
        }
    };

    if distance > max_distance {
        return None;
    }

    Some(CollisionEvent {
        object,
        triangle: TriangleId(t as u32),
        point,
        distance,
        normal: mesh.face_normal(t),
    })
}
