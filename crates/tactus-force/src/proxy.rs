//! Finger-proxy force rendering.
//!
//! The proxy is a secondary point that tracks the device position but
//! may never cross a surface: its path toward the device is swept
//! against the scene each tick, and every surface it would pierce
//! becomes a half-space constraint (up to three — face, edge, vertex
//! contact). The rendered force is the spring between proxy and
//! device, so the surface feels solid regardless of device speed or
//! update rate — a device position used directly would tunnel through
//! thin or fast-approached geometry.

use tactus_collision::{CollisionScene, CollisionSettings, Probe};
use tactus_math::{Mat3, Plane, Vec3};
use tactus_types::constants::EPSILON;
use tactus_types::TactusResult;

use crate::algorithm::{ForceAlgorithm, ForceResult};
use crate::config::ForceConfig;
use crate::point::{ConstraintPlane, HapticPoint};

/// Constrained-proxy force algorithm.
///
/// All persistent state lives on the [`HapticPoint`]; the algorithm
/// itself is stateless and can serve any number of points.
#[derive(Debug, Default)]
pub struct FingerProxy;

impl FingerProxy {
    /// Creates a finger-proxy algorithm.
    pub fn new() -> Self {
        Self
    }

    /// Re-derives each active constraint plane from live geometry.
    ///
    /// Returns `false` when any supporting triangle has vanished
    /// (object gone, index out of range, marked dead, or degenerate) —
    /// the caller then regresses the point to free rather than leave a
    /// constraint referencing invalid geometry.
    fn revalidate_constraints(point: &mut HapticPoint, scene: &CollisionScene) -> bool {
        let proxy = point.proxy_position;
        for c in point.constraints_mut().iter_mut() {
            let Some(obj) = scene.object(c.object) else {
                return false;
            };
            let mesh = obj.snapshot();
            let t = c.triangle.index();
            if t >= mesh.triangle_count() || !mesh.is_alive(t) {
                return false;
            }
            let mut n = mesh.face_normal(t);
            if n.length_squared() < EPSILON {
                return false;
            }
            // Keep the proxy on the positive (free) side of the refreshed plane.
            let [a, _, _] = mesh.triangle_positions(t);
            if n.dot(proxy - a) < 0.0 {
                n = -n;
            }
            c.plane = Plane::from_point_normal(a, n);
        }
        true
    }

    /// Tangential stick/slip on the primary constraint plane.
    ///
    /// The stick point holds the proxy in place until the tangential
    /// spring exceeds the static friction cone; it then slips, trailing
    /// the frictionless position at the dynamic cone radius.
    fn apply_friction(
        point: &mut HapticPoint,
        goal: Vec3,
        device: Vec3,
        config: &ForceConfig,
    ) -> Vec3 {
        let lifted = lift(&point.constraints()[0], config.contact_offset);
        let depth = (-lifted.signed_distance(device)).max(0.0);

        let stick = match point.stick_point {
            // The plane may have moved since last tick; keep the
            // reference point on it.
            Some(s) => lifted.project(s),
            None => {
                point.stick_point = Some(goal);
                return goal;
            }
        };

        let delta = goal - stick;
        if delta.length() <= config.static_friction * depth {
            point.stick_point = Some(stick);
            return stick;
        }

        let slipped = goal - delta.normalize_or_zero() * (config.dynamic_friction * depth);
        point.stick_point = Some(slipped);
        slipped
    }
}

impl ForceAlgorithm for FingerProxy {
    fn compute(
        &mut self,
        point: &mut HapticPoint,
        scene: &mut CollisionScene,
        config: &ForceConfig,
    ) -> TactusResult<ForceResult> {
        let device = point.device_position;
        let mut events = 0u32;
        let mut nearest: Option<f32> = None;

        // Constraints must be backed by live geometry before anything
        // else looks at them. A vanished triangle regresses the point
        // to free — recovered, not an error.
        if !Self::revalidate_constraints(point, scene) {
            tracing::debug!(point = point.id.0, "constraint invalidated, regressing to free");
            point.clear_constraints();
        }

        // Release constraints whose free half-space the device re-entered.
        point
            .constraints_mut()
            .retain(|c| c.plane.signed_distance(device) < 0.0);
        if point.constraints().is_empty() {
            point.stick_point = None;
        }

        // Constraint acquisition: walk the proxy toward its goal,
        // sweeping the path against the scene. Each pierced surface
        // becomes a constraint and tightens the goal; three constraints
        // pin the proxy completely.
        let mut proxy = point.proxy_position;
        let settings = CollisionSettings::all_within(f32::INFINITY);

        for _ in 0..3 {
            let goal = constrained_goal(point.constraints(), device, config.contact_offset);
            let delta = goal - proxy;
            if delta.length_squared() <= EPSILON * EPSILON {
                break;
            }

            let recorder = scene.query(
                &Probe::Segment {
                    start: proxy,
                    end: goal,
                },
                &settings,
            )?;
            events += recorder.len() as u32;
            if let Some(e) = recorder.nearest() {
                nearest = Some(nearest.map_or(e.distance, |d: f32| d.min(e.distance)));
            }

            // The recorder is distance-sorted; the first hit not backed
            // by an already-active constraint is the new contact.
            let hit = recorder
                .events()
                .iter()
                .find(|e| {
                    !point
                        .constraints()
                        .iter()
                        .any(|c| c.object == e.object && c.triangle == e.triangle)
                })
                .copied();

            match hit {
                None => {
                    proxy = goal;
                    break;
                }
                Some(hit) => {
                    let mut n = hit.normal;
                    if n.length_squared() < EPSILON {
                        // Degenerate triangle: stop at the surface, no constraint.
                        proxy = hit.point;
                        break;
                    }
                    // Orient the constraint toward the side the proxy came from.
                    if n.dot(proxy - hit.point) < 0.0 {
                        n = -n;
                    }
                    proxy = hit.point + n * config.contact_offset;
                    if point.constraints().len() < 3 {
                        point.push_constraint(ConstraintPlane {
                            plane: Plane::from_point_normal(hit.point, n),
                            object: hit.object,
                            triangle: hit.triangle,
                        });
                    } else {
                        break;
                    }
                }
            }
        }

        // Friction only makes sense for face contact; edge and vertex
        // contacts already pin the tangential directions.
        if point.constraints().len() == 1 && config.static_friction > 0.0 {
            proxy = Self::apply_friction(point, proxy, device, config);
        }

        point.proxy_position = proxy;

        // Spring between proxy and device, clamped to the device's
        // renderable maximum.
        let mut force = (proxy - device) * config.stiffness;
        let magnitude = force.length();
        if magnitude > config.max_force {
            force *= config.max_force / magnitude;
        }
        point.force = force;

        Ok(ForceResult {
            force,
            collision_events: events,
            nearest_distance: nearest,
        })
    }

    fn name(&self) -> &str {
        "finger_proxy"
    }
}

/// The constraint plane lifted by the contact offset, so goals keep
/// the proxy numerically off the surface.
fn lift(c: &ConstraintPlane, offset: f32) -> Plane {
    Plane {
        normal: c.plane.normal,
        offset: c.plane.offset + offset,
    }
}

/// The proxy's goal position under the active constraint set: the
/// device position projected onto 0, 1, 2, or 3 half-space boundaries.
///
/// Degenerate constraint combinations (near-parallel planes) fall back
/// to fewer constraints rather than produce an ill-conditioned solve.
fn constrained_goal(constraints: &[ConstraintPlane], device: Vec3, offset: f32) -> Vec3 {
    match constraints {
        [] => device,
        [c] => lift(c, offset).project(device),
        [c1, c2] => plane_pair_goal(device, lift(c1, offset), lift(c2, offset))
            .unwrap_or_else(|| lift(c2, offset).project(device)),
        [c1, c2, c3, ..] => {
            plane_triple_goal(lift(c1, offset), lift(c2, offset), lift(c3, offset))
                .or_else(|| plane_pair_goal(device, lift(c1, offset), lift(c2, offset)))
                .unwrap_or_else(|| lift(c3, offset).project(device))
        }
    }
}

/// Closest point to `device` on the intersection line of two planes.
fn plane_pair_goal(device: Vec3, p1: Plane, p2: Plane) -> Option<Vec3> {
    let n1 = p1.normal;
    let n2 = p2.normal;
    let dir = n1.cross(n2);
    let denom = dir.length_squared();
    if denom < EPSILON {
        return None; // Near-parallel planes
    }

    // Point satisfying both plane equations (unit normals).
    let dot = n1.dot(n2);
    let inv = 1.0 / (1.0 - dot * dot);
    let k1 = (p1.offset - p2.offset * dot) * inv;
    let k2 = (p2.offset - p1.offset * dot) * inv;
    let p0 = n1 * k1 + n2 * k2;

    Some(p0 + dir * (dir.dot(device - p0) / denom))
}

/// Intersection point of three planes (vertex contact).
fn plane_triple_goal(p1: Plane, p2: Plane, p3: Plane) -> Option<Vec3> {
    let m = Mat3::from_cols(p1.normal, p2.normal, p3.normal).transpose();
    if m.determinant().abs() < EPSILON {
        return None;
    }
    Some(m.inverse() * Vec3::new(p1.offset, p2.offset, p3.offset))
}
