//! Force rendering configuration.
//!
//! Parameters that control contact response: spring stiffness, force
//! clamping, friction coefficients, the servo tick budget.

use serde::{Deserialize, Serialize};
use tactus_types::constants;

/// Configuration for force rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceConfig {
    /// Contact spring stiffness (N/m). Scales the proxy–device spring.
    pub stiffness: f32,

    /// Maximum force magnitude (N). The computed force is clamped to
    /// this before being returned to the device layer.
    pub max_force: f32,

    /// Offset between the proxy and the surface it rests on (meters).
    /// Keeps the proxy numerically off its own constraint planes.
    pub contact_offset: f32,

    /// Servo tick budget (microseconds). Exceeding it emits a
    /// `BudgetOverrun` telemetry event — never an error.
    pub tick_budget_us: u64,

    /// Static friction coefficient. Zero disables friction: the proxy
    /// slides freely along constraint planes.
    pub static_friction: f32,

    /// Dynamic friction coefficient. Should be ≤ `static_friction`.
    pub dynamic_friction: f32,

    /// Query radius for the potential-field algorithm (meters).
    pub field_radius: f32,

    /// Blend factor in `[0, 1)` applied to the previous contact normal
    /// by the potential-field algorithm, damping force discontinuities
    /// when the nearest feature flips near an edge.
    pub normal_damping: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            stiffness: constants::DEFAULT_STIFFNESS,
            max_force: constants::DEFAULT_MAX_FORCE,
            contact_offset: constants::DEFAULT_CONTACT_OFFSET,
            tick_budget_us: constants::DEFAULT_TICK_BUDGET_US,
            static_friction: 0.0,
            dynamic_friction: 0.0,
            field_radius: 0.05,
            normal_damping: 0.5,
        }
    }
}

impl ForceConfig {
    /// A softer contact for compliant surfaces or noisy devices.
    pub fn soft() -> Self {
        Self {
            stiffness: 100.0,
            max_force: 4.0,
            ..Default::default()
        }
    }

    /// A stiff contact with friction, for rigid-surface rendering.
    pub fn rigid() -> Self {
        Self {
            stiffness: 1500.0,
            static_friction: 0.4,
            dynamic_friction: 0.3,
            ..Default::default()
        }
    }

    /// Validates parameter ranges.
    pub fn validate(&self) -> tactus_types::TactusResult<()> {
        use tactus_types::TactusError;
        if self.stiffness <= 0.0 {
            return Err(TactusError::InvalidConfig(
                "stiffness must be positive".into(),
            ));
        }
        if self.max_force <= 0.0 {
            return Err(TactusError::InvalidConfig(
                "max_force must be positive".into(),
            ));
        }
        if self.dynamic_friction > self.static_friction {
            return Err(TactusError::InvalidConfig(
                "dynamic_friction must not exceed static_friction".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.normal_damping) {
            return Err(TactusError::InvalidConfig(
                "normal_damping must be in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}
