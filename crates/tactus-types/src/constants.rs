//! Servo-rate constants and numerical defaults.

/// Default servo loop frequency (Hz). Haptic devices expect ≥ 1 kHz.
pub const DEFAULT_SERVO_HZ: f64 = 1000.0;

/// Default servo tick budget in microseconds (one period at 1 kHz).
pub const DEFAULT_TICK_BUDGET_US: u64 = 1000;

/// Default contact spring stiffness (N/m).
pub const DEFAULT_STIFFNESS: f32 = 500.0;

/// Default maximum force magnitude (N). Forces are clamped to this
/// before being returned to the device layer.
pub const DEFAULT_MAX_FORCE: f32 = 10.0;

/// Default offset between the proxy and the contact surface (meters).
/// Keeps the proxy numerically off the plane it rests on.
pub const DEFAULT_CONTACT_OFFSET: f32 = 1.0e-4;

/// Maximum number of triangles in a bounding-volume-hierarchy leaf.
pub const BVH_LEAF_SIZE: usize = 4;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;

/// Epsilon for degenerate triangle detection (area threshold).
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;
