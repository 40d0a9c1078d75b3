//! Force algorithm trait — the core abstraction for contact response.
//!
//! Every algorithm implements this trait, enabling the tool to swap
//! between the finger-proxy and potential-field renderers at runtime.

use tactus_collision::CollisionScene;
use tactus_math::Vec3;
use tactus_types::TactusResult;

use crate::config::ForceConfig;
use crate::point::HapticPoint;

/// Result of one algorithm invocation for one haptic point.
#[derive(Debug, Clone, Copy)]
pub struct ForceResult {
    /// The reaction force for this point (already clamped).
    pub force: Vec3,
    /// Total collision events recorded across the internal queries.
    pub collision_events: u32,
    /// Distance of the nearest hit seen this tick, if any.
    pub nearest_distance: Option<f32>,
}

impl ForceResult {
    /// A zero-force result with no recorded contacts.
    pub fn none() -> Self {
        Self {
            force: Vec3::ZERO,
            collision_events: 0,
            nearest_distance: None,
        }
    }
}

/// Which force algorithm a tool runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// Constrained-proxy rendering ([`FingerProxy`](crate::proxy::FingerProxy)).
    FingerProxy,
    /// Penetration-depth rendering ([`PotentialField`](crate::potential::PotentialField)).
    PotentialField,
}

/// Trait for per-tick force computation.
///
/// The tool calls [`ForceAlgorithm::compute`] once per haptic point
/// per servo tick, after [`HapticPoint::begin_tick`] has installed the
/// new device sample. The algorithm queries the scene, updates the
/// point's proxy/constraint state, and returns the reaction force.
///
/// # Implementations
///
/// - [`FingerProxy`](crate::proxy::FingerProxy) — constrained proxy, non-penetrating
/// - [`PotentialField`](crate::potential::PotentialField) — direct penetration response
pub trait ForceAlgorithm: Send {
    /// Computes this tick's force for `point`.
    ///
    /// Contact-path failures (stale geometry, vanished constraint
    /// triangles) are recovered internally by regressing to a safe
    /// state; they never surface as errors here.
    fn compute(
        &mut self,
        point: &mut HapticPoint,
        scene: &mut CollisionScene,
        config: &ForceConfig,
    ) -> TactusResult<ForceResult>;

    /// Returns the algorithm's name.
    fn name(&self) -> &str;
}
