//! # tactus-force
//!
//! Force rendering for haptic interaction.
//!
//! Two algorithms behind one trait:
//! - [`FingerProxy`] — a constrained proxy point that tracks the device
//!   position without ever penetrating the surface. The rendered
//!   surface feels solid regardless of device speed or update rate.
//! - [`PotentialField`] — force straight from penetration depth and the
//!   nearest surface normal. Cheaper, but does not guarantee
//!   non-penetration.
//!
//! [`HapticTool`] is the per-tick entry point the device layer calls:
//! it refreshes geometry snapshots, runs the active algorithm for each
//! haptic point, and returns the combined force/torque.

pub mod algorithm;
pub mod config;
pub mod point;
pub mod potential;
pub mod proxy;
pub mod tool;

pub use algorithm::{AlgorithmKind, ForceAlgorithm, ForceResult};
pub use config::ForceConfig;
pub use point::{ConstraintPlane, ContactState, HapticPoint};
pub use potential::PotentialField;
pub use proxy::FingerProxy;
pub use tool::{HapticTool, Interaction};
