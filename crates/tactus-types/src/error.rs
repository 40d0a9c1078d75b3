//! Error types for the Tactus haptic core.
//!
//! All crates return `TactusResult<T>` from fallible operations.
//! Contact-path failures (`StaleGeometry`, `ConstraintInvalidated`,
//! `BudgetOverrun`) are recovered locally within the servo tick and
//! reported through telemetry; only malformed-input errors propagate
//! to the caller performing the edit.

use thiserror::Error;

/// Unified error type for the Tactus haptic core.
#[derive(Debug, Error)]
pub enum TactusError {
    /// A triangle references a vertex index outside the mesh's vertex count.
    #[error("Invalid index: {index} (valid range 0..{count})")]
    InvalidIndex { index: u32, count: u32 },

    /// The requested entity does not exist (e.g. removing a triangle twice).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A cached acceleration structure no longer matches the geometry revision.
    /// Auto-recovered by rebuild; surfaced only for diagnostics.
    #[error("Stale geometry: structure built for revision {built}, mesh at revision {current}")]
    StaleGeometry { built: u64, current: u64 },

    /// A constraint plane's supporting triangle vanished from the mesh.
    /// Auto-recovered by regressing the contact state to free.
    #[error("Constraint invalidated: triangle {triangle} no longer present")]
    ConstraintInvalidated { triangle: u32 },

    /// A servo tick exceeded its time budget. Logged and metriced, never fatal.
    #[error("Servo budget overrun: tick took {actual_us} µs (budget {budget_us} µs)")]
    BudgetOverrun { budget_us: u64, actual_us: u64 },

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A structural invariant was violated (e.g. a hierarchy node's box
    /// failing to contain its children).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, TactusError>`.
pub type TactusResult<T> = Result<T, TactusError>;
