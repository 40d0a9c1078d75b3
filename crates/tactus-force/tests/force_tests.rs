//! Integration tests for tactus-force.

use std::sync::Arc;

use tactus_collision::{BruteForce, Bvh, CollisionScene};
use tactus_force::{AlgorithmKind, ContactState, ForceConfig, HapticTool};
use tactus_math::Vec3;
use tactus_mesh::generators::{quad_grid, uv_sphere};
use tactus_mesh::{GeometryStore, Mesh};

fn single_triangle_plane() -> Mesh {
    // One large triangle in the z = 0 plane containing the origin,
    // face normal +Z.
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex_at(Vec3::new(-2.0, -2.0, 0.0));
    let b = mesh.add_vertex_at(Vec3::new(2.0, -2.0, 0.0));
    let c = mesh.add_vertex_at(Vec3::new(0.0, 2.0, 0.0));
    mesh.add_triangle(a, b, c).unwrap();
    mesh
}

fn plane_tool(config: ForceConfig) -> (HapticTool, Arc<GeometryStore>) {
    let store = Arc::new(GeometryStore::new(single_triangle_plane()));
    let mut scene = CollisionScene::new();
    scene
        .add_object(Arc::clone(&store), Box::new(BruteForce::new()))
        .unwrap();
    (HapticTool::new(scene, config), store)
}

// ─── Finger Proxy: Plane Press ────────────────────────────────

#[test]
fn proxy_stops_at_plane_surface() {
    let (mut tool, _store) = plane_tool(ForceConfig::default());
    tool.initialize(Vec3::new(0.0, 0.0, 1.0));

    let ticks = 100;
    let mut touched = false;
    for i in 0..=ticks {
        // Device descends from z = 1 to z = -1.
        let z = 1.0 - 2.0 * i as f32 / ticks as f32;
        let interaction = tool.compute_interaction(Vec3::new(0.0, 0.0, z)).unwrap();

        // Non-penetration invariant: the proxy never crosses the surface.
        assert!(
            interaction.proxy_position.z >= 0.0,
            "proxy penetrated at tick {i}: z = {}",
            interaction.proxy_position.z
        );

        if z < 0.0 {
            touched = true;
            assert_eq!(interaction.state, ContactState::Constrained);
            // Constrained force points out of the surface.
            assert!(interaction.force.z > 0.0, "force.z = {}", interaction.force.z);
            assert!(interaction.force.x.abs() < 1e-4);
            assert!(interaction.force.y.abs() < 1e-4);
        }
    }
    assert!(touched);
}

#[test]
fn proxy_force_scales_with_penetration_until_clamp() {
    let (mut tool, _store) = plane_tool(ForceConfig::default());
    tool.initialize(Vec3::new(0.0, 0.0, 0.5));

    // Shallow press.
    tool.compute_interaction(Vec3::new(0.0, 0.0, 0.001)).unwrap();
    let shallow = tool
        .compute_interaction(Vec3::new(0.0, 0.0, -0.002))
        .unwrap();
    // Deeper press doubles the spring elongation.
    let deep = tool
        .compute_interaction(Vec3::new(0.0, 0.0, -0.004))
        .unwrap();
    assert!(deep.force.z > shallow.force.z);

    // Far beyond max_force / stiffness: the clamp kicks in.
    let clamped = tool.compute_interaction(Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let config = tool.config().clone();
    assert!((clamped.force.length() - config.max_force).abs() < 1e-3);
}

#[test]
fn proxy_releases_when_device_retreats() {
    let (mut tool, _store) = plane_tool(ForceConfig::default());
    tool.initialize(Vec3::new(0.0, 0.0, 0.5));

    tool.compute_interaction(Vec3::new(0.0, 0.0, -0.01)).unwrap();
    assert_eq!(
        tool.haptic_point(0).unwrap().contact_state(),
        ContactState::Constrained
    );

    let released = tool.compute_interaction(Vec3::new(0.0, 0.0, 0.3)).unwrap();
    assert_eq!(released.state, ContactState::Free);
    assert_eq!(released.force, Vec3::ZERO);
    // Free proxy snaps back to the device.
    assert!((released.proxy_position - Vec3::new(0.0, 0.0, 0.3)).length() < 1e-5);
}

// ─── Finger Proxy: Tangential Motion ──────────────────────────

#[test]
fn proxy_slides_in_plane_without_friction() {
    let (mut tool, _store) = plane_tool(ForceConfig::default());
    tool.initialize(Vec3::new(0.0, 0.0, 0.1));

    // Press straight down, then slide along +X at constant depth.
    tool.compute_interaction(Vec3::new(0.0, 0.0, -0.01)).unwrap();
    let mut last = None;
    for i in 1..=20 {
        let x = 0.01 * i as f32;
        let interaction = tool
            .compute_interaction(Vec3::new(x, 0.0, -0.01))
            .unwrap();

        // Proxy follows tangentially (slip)...
        assert!((interaction.proxy_position.x - x).abs() < 1e-4);
        // ...with no tangential force beyond numerical noise; the
        // normal component alone compensates the penetration.
        assert!(interaction.force.x.abs() < 1e-4);
        assert!(interaction.force.z > 0.0);
        last = Some(interaction);
    }
    assert_eq!(last.unwrap().state, ContactState::Constrained);
}

#[test]
fn proxy_sticks_inside_static_friction_cone() {
    let config = ForceConfig {
        static_friction: 0.5,
        dynamic_friction: 0.4,
        ..Default::default()
    };
    let (mut tool, _store) = plane_tool(config);
    tool.initialize(Vec3::new(0.0, 0.0, 0.1));

    // Press to 10 mm depth: static cone radius is ~5 mm.
    tool.compute_interaction(Vec3::new(0.0, 0.0, -0.01)).unwrap();

    // A 2 mm tangential move stays inside the cone: the proxy sticks.
    let stuck = tool
        .compute_interaction(Vec3::new(0.002, 0.0, -0.01))
        .unwrap();
    assert!(stuck.proxy_position.x.abs() < 1e-5);
    // The tangential spring now resists the device's motion.
    assert!(stuck.force.x < 0.0);

    // A 20 mm move exceeds the cone: the proxy slips forward.
    let slipped = tool
        .compute_interaction(Vec3::new(0.02, 0.0, -0.01))
        .unwrap();
    assert!(slipped.proxy_position.x > 0.01);
    // Dynamic friction keeps the proxy trailing the device.
    assert!(slipped.proxy_position.x < 0.02);
}

// ─── Finger Proxy: Recovery Paths ─────────────────────────────

#[test]
fn empty_scene_is_free_and_forceless() {
    let mut tool = HapticTool::new(CollisionScene::new(), ForceConfig::default());
    tool.initialize(Vec3::ZERO);

    for i in 0..10 {
        let device = Vec3::new(0.01 * i as f32, -0.02, 0.3);
        let interaction = tool.compute_interaction(device).unwrap();
        assert_eq!(interaction.state, ContactState::Free);
        assert_eq!(interaction.force, Vec3::ZERO);
        assert_eq!(interaction.torque, Vec3::ZERO);
        assert!((interaction.proxy_position - device).length() < 1e-6);
    }
}

#[test]
fn vanished_constraint_regresses_to_free() {
    let (mut tool, store) = plane_tool(ForceConfig::default());
    tool.initialize(Vec3::new(0.0, 0.0, 0.1));

    tool.compute_interaction(Vec3::new(0.0, 0.0, -0.01)).unwrap();
    assert_eq!(
        tool.haptic_point(0).unwrap().contact_state(),
        ContactState::Constrained
    );

    // The supporting triangle is edited out from under the algorithm.
    store.commit(|mesh| {
        mesh.clear();
        Ok(())
    })
    .unwrap();

    let interaction = tool.compute_interaction(Vec3::new(0.0, 0.0, -0.01)).unwrap();
    assert_eq!(interaction.state, ContactState::Free);
    assert_eq!(interaction.force, Vec3::ZERO);
}

// ─── Potential Field ──────────────────────────────────────────

#[test]
fn potential_field_pushes_outward_from_inside() {
    let store = Arc::new(GeometryStore::new(uv_sphere(0.1, 12, 16)));
    let mut scene = CollisionScene::new();
    scene.add_object(store, Box::new(Bvh::new())).unwrap();

    let mut tool = HapticTool::new(scene, ForceConfig::default());
    tool.set_algorithm(AlgorithmKind::PotentialField);
    tool.initialize(Vec3::ZERO);

    // Just inside the surface along +X: the field pushes outward.
    let interaction = tool
        .compute_interaction(Vec3::new(0.095, 0.0, 0.0))
        .unwrap();
    assert!(interaction.force.x > 0.0);
    assert!(interaction.force.length() > 0.0);
}

#[test]
fn potential_field_is_silent_outside_radius() {
    let store = Arc::new(GeometryStore::new(uv_sphere(0.1, 12, 16)));
    let mut scene = CollisionScene::new();
    scene.add_object(store, Box::new(Bvh::new())).unwrap();

    let mut tool = HapticTool::new(scene, ForceConfig::default());
    tool.set_algorithm(AlgorithmKind::PotentialField);
    tool.initialize(Vec3::new(0.5, 0.0, 0.0));

    let interaction = tool.compute_interaction(Vec3::new(0.5, 0.0, 0.0)).unwrap();
    assert_eq!(interaction.force, Vec3::ZERO);
    assert_eq!(interaction.state, ContactState::Free);
}

#[test]
fn potential_field_does_not_constrain() {
    let (mut tool, _store) = plane_tool(ForceConfig::default());
    tool.set_algorithm(AlgorithmKind::PotentialField);
    tool.initialize(Vec3::new(0.0, 0.0, 0.1));

    // Below the plane within the field radius, force pushes up but
    // the point carries no proxy constraints.
    let interaction = tool
        .compute_interaction(Vec3::new(0.0, 0.0, -0.01))
        .unwrap();
    assert!(interaction.force.z > 0.0);
    assert_eq!(interaction.state, ContactState::Free);
}

// ─── Tool Interface ───────────────────────────────────────────

#[test]
fn algorithm_switch_resets_contact_state() {
    let (mut tool, _store) = plane_tool(ForceConfig::default());
    tool.initialize(Vec3::new(0.0, 0.0, 0.1));
    tool.compute_interaction(Vec3::new(0.0, 0.0, -0.01)).unwrap();
    assert_eq!(
        tool.haptic_point(0).unwrap().contact_state(),
        ContactState::Constrained
    );

    tool.set_algorithm(AlgorithmKind::PotentialField);
    assert_eq!(tool.algorithm_kind(), AlgorithmKind::PotentialField);
    assert_eq!(
        tool.haptic_point(0).unwrap().contact_state(),
        ContactState::Free
    );
}

#[test]
fn symmetric_two_point_tool_cancels_torque() {
    let store = Arc::new(GeometryStore::new(single_triangle_plane()));
    let mut scene = CollisionScene::new();
    scene.add_object(store, Box::new(BruteForce::new())).unwrap();

    let offsets = [Vec3::new(0.05, 0.0, 0.0), Vec3::new(-0.05, 0.0, 0.0)];
    let mut tool = HapticTool::with_offsets(scene, ForceConfig::default(), &offsets);
    tool.initialize(Vec3::new(0.0, 0.0, 0.1));

    let interaction = tool.compute_interaction(Vec3::new(0.0, 0.0, -0.01)).unwrap();
    // Both points press equally: forces add, torques cancel.
    assert!(interaction.force.z > 0.0);
    assert!(interaction.torque.length() < 1e-5);
    assert_eq!(tool.point_count(), 2);
}

#[test]
fn config_round_trips_and_validates() {
    let config = ForceConfig::rigid();
    assert!(config.validate().is_ok());

    let text = toml::to_string(&config).unwrap();
    let recovered: ForceConfig = toml::from_str(&text).unwrap();
    assert_eq!(recovered.stiffness, config.stiffness);
    assert_eq!(recovered.static_friction, config.static_friction);

    let bad = ForceConfig {
        dynamic_friction: 0.9,
        static_friction: 0.1,
        ..Default::default()
    };
    assert!(bad.validate().is_err());
}
