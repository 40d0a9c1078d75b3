//! Collision query configuration.

use serde::{Deserialize, Serialize};

/// Per-query configuration consumed by detectors and the scene filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionSettings {
    /// Skip scene objects with `visible == false`.
    pub visible_only: bool,

    /// Skip scene objects with `haptic_enabled == false`.
    pub haptic_enabled_only: bool,

    /// Maximum distance from the probe origin for a hit to be recorded.
    pub max_distance: f32,

    /// Collect every hit within range (`true`) or only the nearest (`false`).
    pub collect_all: bool,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            visible_only: false,
            haptic_enabled_only: true,
            max_distance: f32::INFINITY,
            collect_all: false,
        }
    }
}

impl CollisionSettings {
    /// Settings for a nearest-hit query within `max_distance`.
    pub fn nearest_within(max_distance: f32) -> Self {
        Self {
            max_distance,
            collect_all: false,
            ..Default::default()
        }
    }

    /// Settings collecting all hits within `max_distance`.
    pub fn all_within(max_distance: f32) -> Self {
        Self {
            max_distance,
            collect_all: true,
            ..Default::default()
        }
    }
}
