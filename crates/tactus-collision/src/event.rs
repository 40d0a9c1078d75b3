//! Collision events and the per-query recorder.
//!
//! A `CollisionEvent` is one recorded hit; a `CollisionRecorder`
//! accumulates the ordered hits of a single query call. The recorder
//! is cleared at the start of each query and read by the force
//! algorithm immediately after the query returns — it is never
//! persisted across servo ticks.

use serde::{Deserialize, Serialize};
use tactus_math::Vec3;
use tactus_types::{ObjectId, TriangleId};

use crate::settings::CollisionSettings;

/// One recorded hit.
///
/// `distance` is measured from the probe origin: point probes report
/// the distance to the closest feature, segment probes the distance
/// travelled along the sweep, sphere probes the surface-to-surface
/// distance (negative when the sphere penetrates).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// The scene object hit.
    pub object: ObjectId,
    /// The triangle hit, as an index into the object's snapshot.
    pub triangle: TriangleId,
    /// Contact point on the surface, in mesh coordinates.
    pub point: Vec3,
    /// Distance from the query origin.
    pub distance: f32,
    /// Surface normal at the contact (the triangle's face normal,
    /// following winding order — not oriented toward the probe).
    pub normal: Vec3,
}

/// Ordered sequence of collision events for a single query call.
#[derive(Debug, Clone, Default)]
pub struct CollisionRecorder {
    events: Vec<CollisionEvent>,
}

impl CollisionRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Drops all recorded events. Called at the start of each query.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Appends one event.
    pub fn record(&mut self, event: CollisionEvent) {
        self.events.push(event);
    }

    /// The recorded events, in their current order.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no events were recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The nearest event under the deterministic ordering, if any.
    pub fn nearest(&self) -> Option<&CollisionEvent> {
        self.events.iter().min_by(|a, b| Self::order(a, b))
    }

    /// Sorts events by `(distance, object, triangle)` — ties broken by
    /// ascending triangle index for determinism — and truncates to the
    /// single nearest hit unless `settings.collect_all` is set.
    pub fn finalize(&mut self, settings: &CollisionSettings) {
        self.events.sort_by(Self::order);
        if !settings.collect_all {
            self.events.truncate(1);
        }
    }

    fn order(a: &CollisionEvent, b: &CollisionEvent) -> std::cmp::Ordering {
        a.distance
            .total_cmp(&b.distance)
            .then(a.object.cmp(&b.object))
            .then(a.triangle.cmp(&b.triangle))
    }
}
