//! # tactus-bench
//!
//! Executable servo-loop scenarios with metrics collection.
//!
//! Each scenario pairs procedural geometry with a deterministic device
//! trajectory (press into a plane, slide along it, trace a sphere,
//! probe an empty scene). The runner drives a [`HapticTool`] through
//! the trajectory and reports tick timing, overruns, and force
//! statistics.
//!
//! [`HapticTool`]: tactus_force::HapticTool

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::ServoMetrics;
pub use runner::ServoRunner;
pub use scenarios::{Scenario, ScenarioKind};
