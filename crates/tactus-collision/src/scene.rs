//! Collision scene — the set of collidable objects a tool queries.
//!
//! Each object pairs a [`GeometryStore`] with its own detector and the
//! world-side enable flags (visible / haptic-enabled). At the start of
//! each servo tick the scene refreshes every object's snapshot and
//! acceleration structure; queries then run against those frozen
//! snapshots for the rest of the tick.

use std::sync::Arc;

use tactus_mesh::{GeometryStore, Mesh};
use tactus_types::{ObjectId, TactusResult};

use crate::detector::CollisionDetector;
use crate::event::CollisionRecorder;
use crate::probe::Probe;
use crate::settings::CollisionSettings;

/// One collidable object: geometry plus detector plus scene flags.
pub struct SceneObject {
    /// Scene handle for this object.
    pub id: ObjectId,
    /// Shared geometry store (edited by the update thread).
    pub store: Arc<GeometryStore>,
    /// Rendered this frame. Filtered by `CollisionSettings::visible_only`.
    pub visible: bool,
    /// Participates in haptic interaction. Filtered by
    /// `CollisionSettings::haptic_enabled_only`.
    pub haptic_enabled: bool,

    detector: Box<dyn CollisionDetector + Send>,
    snapshot: Arc<Mesh>,
}

impl SceneObject {
    /// Creates an object over `store` using the given detector.
    pub fn new(
        id: ObjectId,
        store: Arc<GeometryStore>,
        mut detector: Box<dyn CollisionDetector + Send>,
    ) -> TactusResult<Self> {
        let snapshot = store.snapshot();
        detector.prepare(&snapshot)?;
        Ok(Self {
            id,
            store,
            visible: true,
            haptic_enabled: true,
            detector,
            snapshot,
        })
    }

    /// Refreshes the snapshot and acceleration structure.
    ///
    /// Returns `true` if the geometry revision changed since the last
    /// tick (i.e. a rebuild happened).
    pub fn begin_tick(&mut self) -> TactusResult<bool> {
        let latest = self.store.snapshot();
        let changed = latest.revision() != self.snapshot.revision();
        self.snapshot = latest;
        if changed {
            self.detector.prepare(&self.snapshot)?;
        }
        Ok(changed)
    }

    /// The snapshot queries run against this tick.
    pub fn snapshot(&self) -> &Arc<Mesh> {
        &self.snapshot
    }

    /// The detector strategy name (for diagnostics).
    pub fn detector_name(&self) -> &str {
        self.detector.name()
    }

    /// Queries this object, appending hits to `recorder`.
    pub fn query(
        &mut self,
        probe: &Probe,
        settings: &CollisionSettings,
        recorder: &mut CollisionRecorder,
    ) -> TactusResult<()> {
        self.detector
            .query(self.id, probe, &self.snapshot, settings, recorder)
    }
}

/// The set of collidable objects, queried as one.
#[derive(Default)]
pub struct CollisionScene {
    objects: Vec<SceneObject>,
}

impl CollisionScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its handle.
    ///
    /// Handles are assigned sequentially and stay valid for the life
    /// of the scene.
    pub fn add_object(
        &mut self,
        store: Arc<GeometryStore>,
        detector: Box<dyn CollisionDetector + Send>,
    ) -> TactusResult<ObjectId> {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(SceneObject::new(id, store, detector)?);
        Ok(id)
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Borrows an object by handle.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    /// Mutably borrows an object by handle.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.index())
    }

    /// Refreshes every object's snapshot and structure.
    ///
    /// Returns the handles whose geometry changed (and was rebuilt)
    /// since the previous tick.
    pub fn begin_tick(&mut self) -> TactusResult<Vec<ObjectId>> {
        let mut rebuilt = Vec::new();
        for obj in &mut self.objects {
            if obj.begin_tick()? {
                rebuilt.push(obj.id);
            }
        }
        Ok(rebuilt)
    }

    /// Queries every eligible object and finalizes the merged recorder.
    ///
    /// Objects filtered out by the settings flags contribute nothing.
    /// The result is sorted by `(distance, object, triangle)` and
    /// truncated to the nearest hit unless `settings.collect_all`.
    pub fn query(
        &mut self,
        probe: &Probe,
        settings: &CollisionSettings,
    ) -> TactusResult<CollisionRecorder> {
        let mut recorder = CollisionRecorder::new();

        for obj in &mut self.objects {
            if settings.visible_only && !obj.visible {
                continue;
            }
            if settings.haptic_enabled_only && !obj.haptic_enabled {
                continue;
            }
            obj.query(probe, settings, &mut recorder)?;
        }

        recorder.finalize(settings);
        Ok(recorder)
    }
}
