//! Haptic point — per-contact-point state shared between the tool and
//! a force algorithm across servo ticks.
//!
//! The point owns the proxy/device position history and the active
//! constraint set. It is mutated once per tick by exactly one
//! algorithm invocation; it is never shared across threads without
//! external synchronization.

use tactus_math::{Plane, Vec3};
use tactus_types::{ObjectId, PointId, TriangleId};

/// One active constraint plane, backed by the triangle that produced it.
///
/// The backing ids let the proxy algorithm re-derive the plane from
/// live geometry each tick, and detect when the supporting triangle
/// has vanished.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintPlane {
    /// The half-space constraint. The normal points into the free side;
    /// the proxy never crosses to the negative side.
    pub plane: Plane,
    /// Scene object owning the supporting triangle.
    pub object: ObjectId,
    /// The supporting triangle.
    pub triangle: TriangleId,
}

/// Contact state of a haptic point, derived from its constraint count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactState {
    /// No active contact.
    Free,
    /// One constraint plane (face contact).
    Constrained,
    /// Two constraint planes (edge contact).
    DoublyConstrained,
    /// Three constraint planes (vertex contact) — the proxy position
    /// is fully determined.
    TriplyConstrained,
}

/// Per-contact-point state for one probe on a tool.
#[derive(Debug, Clone)]
pub struct HapticPoint {
    /// Identifier of this point on its tool.
    pub id: PointId,

    /// Tool-frame offset from the device origin. Zero for a single-point tool.
    pub offset: Vec3,

    /// Proxy position this tick.
    pub proxy_position: Vec3,
    /// Proxy position last tick.
    pub last_proxy_position: Vec3,

    /// Device position this tick.
    pub device_position: Vec3,
    /// Device position last tick.
    pub last_device_position: Vec3,

    /// Force computed this tick.
    pub force: Vec3,

    /// Tangential stick reference point on the primary constraint
    /// plane. `None` while free or when friction is disabled.
    pub stick_point: Option<Vec3>,

    /// Contact normal from the previous tick (potential-field damping).
    pub last_contact_normal: Option<Vec3>,

    /// Active constraint planes, at most three.
    constraints: Vec<ConstraintPlane>,
}

impl HapticPoint {
    /// Creates a point resting at `position` with no contact.
    pub fn new(id: PointId, position: Vec3) -> Self {
        Self {
            id,
            offset: Vec3::ZERO,
            proxy_position: position,
            last_proxy_position: position,
            device_position: position,
            last_device_position: position,
            force: Vec3::ZERO,
            stick_point: None,
            last_contact_normal: None,
            constraints: Vec::with_capacity(3),
        }
    }

    /// Creates a point with a tool-frame offset.
    pub fn with_offset(id: PointId, position: Vec3, offset: Vec3) -> Self {
        Self {
            offset,
            ..Self::new(id, position)
        }
    }

    /// The contact state implied by the active constraint count.
    pub fn contact_state(&self) -> ContactState {
        match self.constraints.len() {
            0 => ContactState::Free,
            1 => ContactState::Constrained,
            2 => ContactState::DoublyConstrained,
            _ => ContactState::TriplyConstrained,
        }
    }

    /// True when no constraints are active.
    pub fn is_free(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The active constraint planes.
    pub fn constraints(&self) -> &[ConstraintPlane] {
        &self.constraints
    }

    /// Shifts the tick history and installs the new device sample.
    pub fn begin_tick(&mut self, device_position: Vec3) {
        self.last_device_position = self.device_position;
        self.last_proxy_position = self.proxy_position;
        self.device_position = device_position;
    }

    /// Snaps the point to `position` with no contact and no force.
    ///
    /// Used at tool initialization so the first tick does not sweep
    /// the proxy across the whole scene.
    pub fn reset(&mut self, position: Vec3) {
        self.proxy_position = position;
        self.last_proxy_position = position;
        self.device_position = position;
        self.last_device_position = position;
        self.force = Vec3::ZERO;
        self.stick_point = None;
        self.last_contact_normal = None;
        self.constraints.clear();
    }

    pub(crate) fn push_constraint(&mut self, constraint: ConstraintPlane) {
        debug_assert!(self.constraints.len() < 3);
        self.constraints.push(constraint);
    }

    pub(crate) fn clear_constraints(&mut self) {
        self.constraints.clear();
        self.stick_point = None;
    }

    pub(crate) fn constraints_mut(&mut self) -> &mut Vec<ConstraintPlane> {
        &mut self.constraints
    }
}
