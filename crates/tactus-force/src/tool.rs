//! Haptic tool — the per-tick entry point for the device layer.
//!
//! Each servo tick the device layer hands the tool one position
//! sample; the tool refreshes geometry snapshots, runs the active
//! force algorithm for every haptic point, and returns the combined
//! force and torque. Tick wall time is measured against the servo
//! budget; an overrun is reported through telemetry and `tracing`,
//! never as an error — the loop proceeds with the computed result.

use std::time::Instant;

use tactus_collision::CollisionScene;
use tactus_math::Vec3;
use tactus_telemetry::{EventBus, EventKind, ServoEvent};
use tactus_types::{PointId, TactusResult};

use crate::algorithm::{AlgorithmKind, ForceAlgorithm};
use crate::config::ForceConfig;
use crate::point::{ContactState, HapticPoint};
use crate::potential::PotentialField;
use crate::proxy::FingerProxy;

/// Result of one servo tick.
#[derive(Debug, Clone, Copy)]
pub struct Interaction {
    /// Proxy position of the primary haptic point.
    pub proxy_position: Vec3,
    /// Combined reaction force across all points.
    pub force: Vec3,
    /// Combined torque about the device origin: Σ rᵢ × Fᵢ.
    pub torque: Vec3,
    /// Contact state of the primary haptic point.
    pub state: ContactState,
    /// Wall time of this tick (seconds).
    pub wall_time: f64,
}

/// A haptic tool: one or more interaction points over a collision scene.
pub struct HapticTool {
    scene: CollisionScene,
    config: ForceConfig,
    points: Vec<HapticPoint>,
    algorithm: Box<dyn ForceAlgorithm>,
    algorithm_kind: AlgorithmKind,
    bus: EventBus,
    tick: u64,
    last_constraint_count: u32,
}

impl HapticTool {
    /// Creates a single-point tool running the finger-proxy algorithm.
    pub fn new(scene: CollisionScene, config: ForceConfig) -> Self {
        Self::with_offsets(scene, config, &[Vec3::ZERO])
    }

    /// Creates a tool with one haptic point per tool-frame offset.
    ///
    /// Multi-point tools (e.g. a two-jaw gripper) produce a net torque
    /// from the per-point forces.
    pub fn with_offsets(scene: CollisionScene, config: ForceConfig, offsets: &[Vec3]) -> Self {
        // A tool always has at least its primary point.
        let offsets: &[Vec3] = if offsets.is_empty() { &[Vec3::ZERO] } else { offsets };
        let points = offsets
            .iter()
            .enumerate()
            .map(|(i, &offset)| HapticPoint::with_offset(PointId(i as u32), offset, offset))
            .collect();

        Self {
            scene,
            config,
            points,
            algorithm: Box::new(FingerProxy::new()),
            algorithm_kind: AlgorithmKind::FingerProxy,
            bus: EventBus::new(),
            tick: 0,
            last_constraint_count: 0,
        }
    }

    /// Selects the active force algorithm.
    ///
    /// Constraint state is cleared — the two algorithms interpret the
    /// haptic point differently.
    pub fn set_algorithm(&mut self, kind: AlgorithmKind) {
        if kind == self.algorithm_kind {
            return;
        }
        self.algorithm = match kind {
            AlgorithmKind::FingerProxy => Box::new(FingerProxy::new()),
            AlgorithmKind::PotentialField => Box::new(PotentialField::new()),
        };
        self.algorithm_kind = kind;
        for point in &mut self.points {
            let pos = point.device_position;
            point.reset(pos);
        }
    }

    /// The active algorithm kind.
    pub fn algorithm_kind(&self) -> AlgorithmKind {
        self.algorithm_kind
    }

    /// Borrows a haptic point by index.
    pub fn haptic_point(&self, index: usize) -> Option<&HapticPoint> {
        self.points.get(index)
    }

    /// Number of haptic points on this tool.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Borrows the collision scene.
    pub fn scene(&self) -> &CollisionScene {
        &self.scene
    }

    /// Mutably borrows the collision scene (for flag edits between ticks).
    pub fn scene_mut(&mut self) -> &mut CollisionScene {
        &mut self.scene
    }

    /// Borrows the force configuration.
    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    /// Mutably borrows the telemetry bus (to register sinks / flush).
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Snaps every haptic point to the device position with no contact.
    ///
    /// Call once before the servo loop starts so the first tick does
    /// not sweep proxies across the whole scene.
    pub fn initialize(&mut self, device_position: Vec3) {
        for point in &mut self.points {
            let offset = point.offset;
            point.reset(device_position + offset);
        }
        self.last_constraint_count = 0;
    }

    /// Runs one servo tick: the single per-tick entry point.
    ///
    /// Updates every haptic point from the device sample, queries the
    /// collision scene through the active algorithm, and returns the
    /// combined interaction. Only malformed-input errors propagate;
    /// contact-path failures are recovered internally.
    pub fn compute_interaction(&mut self, device_position: Vec3) -> TactusResult<Interaction> {
        let started = Instant::now();
        let tick = self.tick;
        self.tick += 1;

        self.bus.emit(ServoEvent::new(tick, EventKind::TickBegin));

        // Re-read the latest stable geometry at the start of the tick.
        for id in self.scene.begin_tick()? {
            let revision = self
                .scene
                .object(id)
                .map(|o| o.snapshot().revision())
                .unwrap_or(0);
            self.bus
                .emit(ServoEvent::new(tick, EventKind::GeometryRebuilt { revision }));
        }

        let mut force = Vec3::ZERO;
        let mut torque = Vec3::ZERO;
        let mut event_count = 0u32;
        let mut nearest: Option<f32> = None;

        for point in &mut self.points {
            point.begin_tick(device_position + point.offset);
            let result = self.algorithm.compute(point, &mut self.scene, &self.config)?;
            force += result.force;
            torque += (point.device_position - device_position).cross(result.force);
            event_count += result.collision_events;
            nearest = match (nearest, result.nearest_distance) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }

        self.bus.emit(ServoEvent::new(
            tick,
            EventKind::ContactDetection {
                event_count,
                nearest_distance: nearest,
            },
        ));

        let constraint_count = self.points[0].constraints().len() as u32;
        if constraint_count != self.last_constraint_count {
            self.last_constraint_count = constraint_count;
            self.bus.emit(ServoEvent::new(
                tick,
                EventKind::ConstraintChange {
                    active_constraints: constraint_count,
                },
            ));
        }

        let wall_time = started.elapsed().as_secs_f64();
        let actual_us = (wall_time * 1.0e6) as u64;
        if actual_us > self.config.tick_budget_us {
            tracing::warn!(
                tick,
                actual_us,
                budget_us = self.config.tick_budget_us,
                "servo tick exceeded budget"
            );
            self.bus.emit(ServoEvent::new(
                tick,
                EventKind::BudgetOverrun {
                    budget_us: self.config.tick_budget_us,
                    actual_us,
                },
            ));
        }

        self.bus
            .emit(ServoEvent::new(tick, EventKind::TickEnd { wall_time }));

        let primary = &self.points[0];
        Ok(Interaction {
            proxy_position: primary.proxy_position,
            force,
            torque,
            state: primary.contact_state(),
            wall_time,
        })
    }
}
