//! # tactus-telemetry
//!
//! Structured telemetry for the servo loop: budget overruns, contact
//! counts, geometry rebuilds. Events are emitted from the hot path
//! through a lock-free channel and flushed to pluggable sinks outside
//! the tick.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, ServoEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
