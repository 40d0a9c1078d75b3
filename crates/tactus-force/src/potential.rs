//! Potential-field force rendering.
//!
//! Computes the force straight from penetration depth: the nearest
//! surface feature within the field radius defines depth and
//! direction. No constrained proxy, no per-contact state beyond the
//! previous tick's normal (used to damp force discontinuities when the
//! nearest feature flips near an edge). Cheaper than the proxy
//! algorithm, but the device can pass through thin geometry — the
//! trade is selectable per tool.

use tactus_collision::{CollisionScene, CollisionSettings, Probe};
use tactus_math::Vec3;
use tactus_types::constants::EPSILON;
use tactus_types::TactusResult;

use crate::algorithm::{ForceAlgorithm, ForceResult};
use crate::config::ForceConfig;
use crate::point::HapticPoint;

/// Penetration-depth force algorithm.
#[derive(Debug, Default)]
pub struct PotentialField;

impl PotentialField {
    /// Creates a potential-field algorithm.
    pub fn new() -> Self {
        Self
    }
}

impl ForceAlgorithm for PotentialField {
    fn compute(
        &mut self,
        point: &mut HapticPoint,
        scene: &mut CollisionScene,
        config: &ForceConfig,
    ) -> TactusResult<ForceResult> {
        let device = point.device_position;

        let recorder = scene.query(
            &Probe::Point(device),
            &CollisionSettings::nearest_within(config.field_radius),
        )?;

        let Some(event) = recorder.nearest().copied() else {
            // Nothing within the field: no contact, no force.
            point.proxy_position = device;
            point.force = Vec3::ZERO;
            point.last_contact_normal = None;
            return Ok(ForceResult::none());
        };

        let to_device = device - event.point;
        let side = event.normal.dot(to_device);

        if side >= 0.0 || event.normal.length_squared() < EPSILON {
            // On or outside the surface — the field pushes only from inside.
            point.proxy_position = device;
            point.force = Vec3::ZERO;
            point.last_contact_normal = None;
            return Ok(ForceResult {
                force: Vec3::ZERO,
                collision_events: recorder.len() as u32,
                nearest_distance: Some(event.distance),
            });
        }

        // Penetration depth is the distance to the nearest surface
        // feature, not just the plane distance — correct near edges.
        let depth = event.distance;

        // Damp nearest-feature flips by blending with last tick's normal.
        let normal = match point.last_contact_normal {
            Some(prev) => (prev * config.normal_damping
                + event.normal * (1.0 - config.normal_damping))
                .normalize_or_zero(),
            None => event.normal,
        };

        let mut force = normal * (config.stiffness * depth);
        let magnitude = force.length();
        if magnitude > config.max_force {
            force *= config.max_force / magnitude;
        }

        point.proxy_position = event.point;
        point.force = force;
        point.last_contact_normal = Some(normal);

        Ok(ForceResult {
            force,
            collision_events: recorder.len() as u32,
            nearest_distance: Some(event.distance),
        })
    }

    fn name(&self) -> &str {
        "potential_field"
    }
}
