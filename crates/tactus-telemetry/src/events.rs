//! Servo-loop event types.
//!
//! Structured events emitted by the haptic core at various points in
//! each servo tick. Events are lightweight value types that carry just
//! enough data to be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A servo-loop event emitted by the haptic core.
///
/// Events are tagged with a tick index and carry domain-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServoEvent {
    /// Servo tick number (0-indexed).
    pub tick: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Servo tick started.
    TickBegin,

    /// Servo tick completed.
    TickEnd {
        /// Wall-clock time for the entire tick (seconds).
        wall_time: f64,
    },

    /// Collision query completed.
    ContactDetection {
        /// Number of recorded collision events.
        event_count: u32,
        /// Distance of the nearest hit, if any.
        nearest_distance: Option<f32>,
    },

    /// The proxy's active constraint count changed.
    ConstraintChange {
        /// Number of active constraint planes (0–3).
        active_constraints: u32,
    },

    /// A servo tick exceeded its time budget. Informational — the
    /// loop proceeds with the computed result.
    BudgetOverrun {
        /// Budget for one tick (microseconds).
        budget_us: u64,
        /// Actual tick duration (microseconds).
        actual_us: u64,
    },

    /// An object's collision structure was rebuilt after a geometry edit.
    GeometryRebuilt {
        /// Geometry revision the structure now matches.
        revision: u64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl ServoEvent {
    /// Creates a new event for the given tick.
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }
}
