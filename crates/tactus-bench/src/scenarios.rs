//! Servo scenarios — procedural geometry + device trajectory for each
//! test case.
//!
//! Four canonical scenarios for regression testing:
//! 1. **Plane press** — Device descends through a flat plane at z = 0
//! 2. **Tangential slide** — Press, then slide along the plane
//! 3. **Sphere trace** — Device orbits just inside a sphere's surface
//! 4. **Empty scene** — No geometry at all (zero-force baseline)

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tactus_collision::{Bvh, CollisionScene};
use tactus_force::ForceConfig;
use tactus_math::Vec3;
use tactus_mesh::generators::{quad_grid, uv_sphere};
use tactus_mesh::GeometryStore;
use tactus_types::TactusResult;

/// Which servo scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Device descends through a flat plane.
    PlanePress,
    /// Device presses into the plane, then slides tangentially.
    TangentialSlide,
    /// Device orbits just inside a sphere's surface.
    SphereTrace,
    /// No geometry — every tick must produce zero force.
    EmptyScene,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::PlanePress,
            ScenarioKind::TangentialSlide,
            ScenarioKind::SphereTrace,
            ScenarioKind::EmptyScene,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::PlanePress => "plane_press",
            ScenarioKind::TangentialSlide => "tangential_slide",
            ScenarioKind::SphereTrace => "sphere_trace",
            ScenarioKind::EmptyScene => "empty_scene",
        }
    }
}

/// A fully specified servo scenario.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Collision scene (geometry + detectors).
    pub scene: CollisionScene,
    /// Force configuration.
    pub config: ForceConfig,
    /// Number of servo ticks to run.
    pub ticks: u32,
}

impl Scenario {
    /// Create the plane-press scenario.
    ///
    /// A 20 cm plane at z = 0; the device descends from 5 cm above to
    /// 2 cm below over the run. The proxy must stop at the surface.
    pub fn plane_press() -> TactusResult<Self> {
        let mut scene = CollisionScene::new();
        let store = Arc::new(GeometryStore::new(quad_grid(4, 4, 0.2, 0.2)));
        scene.add_object(store, Box::new(Bvh::new()))?;

        Ok(Self {
            kind: ScenarioKind::PlanePress,
            scene,
            config: ForceConfig::default(),
            ticks: 500,
        })
    }

    /// Create the tangential-slide scenario.
    ///
    /// The device presses 5 mm into the plane over the first half of
    /// the run, then slides 5 cm along +X while holding depth.
    pub fn tangential_slide() -> TactusResult<Self> {
        let mut scene = CollisionScene::new();
        let store = Arc::new(GeometryStore::new(quad_grid(4, 4, 0.3, 0.3)));
        scene.add_object(store, Box::new(Bvh::new()))?;

        Ok(Self {
            kind: ScenarioKind::TangentialSlide,
            scene,
            config: ForceConfig::default(),
            ticks: 600,
        })
    }

    /// Create the sphere-trace scenario.
    ///
    /// A 10 cm-radius sphere; the device approaches from outside and
    /// orbits the equator 5 mm below the surface, so the constraint
    /// slides across triangles continuously.
    pub fn sphere_trace() -> TactusResult<Self> {
        let mut scene = CollisionScene::new();
        let store = Arc::new(GeometryStore::new(uv_sphere(0.1, 16, 24)));
        scene.add_object(store, Box::new(Bvh::new()))?;

        Ok(Self {
            kind: ScenarioKind::SphereTrace,
            scene,
            config: ForceConfig::default(),
            ticks: 720,
        })
    }

    /// Create the empty-scene scenario.
    pub fn empty_scene() -> TactusResult<Self> {
        Ok(Self {
            kind: ScenarioKind::EmptyScene,
            scene: CollisionScene::new(),
            config: ForceConfig::default(),
            ticks: 200,
        })
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> TactusResult<Self> {
        match kind {
            ScenarioKind::PlanePress => Self::plane_press(),
            ScenarioKind::TangentialSlide => Self::tangential_slide(),
            ScenarioKind::SphereTrace => Self::sphere_trace(),
            ScenarioKind::EmptyScene => Self::empty_scene(),
        }
    }

    /// Device position at the given tick.
    ///
    /// Trajectories are deterministic functions of the tick index so
    /// runs are exactly reproducible.
    pub fn device_position(&self, tick: u32) -> Vec3 {
        let t = tick as f32 / self.ticks.max(1) as f32;
        match self.kind {
            ScenarioKind::PlanePress => {
                // 5 cm above to 2 cm below, straight down.
                Vec3::new(0.0, 0.0, 0.05 - 0.07 * t)
            }
            ScenarioKind::TangentialSlide => {
                if t < 0.5 {
                    // Press phase: descend to 5 mm below the surface.
                    Vec3::new(0.0, 0.0, 0.02 - 0.05 * t)
                } else {
                    // Slide phase: hold depth, move along +X.
                    Vec3::new(0.1 * (t - 0.5), 0.0, -0.005)
                }
            }
            ScenarioKind::SphereTrace => {
                let angle = 2.0 * std::f32::consts::PI * t;
                // Approach from outside over the first tenth of the run,
                // then orbit the equator 5 mm below the surface.
                let radius = if t < 0.1 { 0.15 - 0.55 * t } else { 0.095 };
                Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
            }
            ScenarioKind::EmptyScene => Vec3::new(0.05 * t, 0.02 * t, -0.03 * t),
        }
    }
}
