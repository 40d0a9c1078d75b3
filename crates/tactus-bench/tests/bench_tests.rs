//! Integration tests for tactus-bench.

use tactus_bench::metrics::ServoMetrics;
use tactus_bench::runner::ServoRunner;
use tactus_bench::scenarios::{Scenario, ScenarioKind};
use tactus_force::AlgorithmKind;

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn plane_press_setup() {
    let s = Scenario::plane_press().unwrap();
    assert_eq!(s.kind, ScenarioKind::PlanePress);
    assert_eq!(s.scene.len(), 1);

    // Starts above the plane, ends below it.
    assert!(s.device_position(0).z > 0.0);
    assert!(s.device_position(s.ticks - 1).z < 0.0);
}

#[test]
fn tangential_slide_holds_depth() {
    let s = Scenario::tangential_slide().unwrap();
    let late = s.device_position(s.ticks - 1);
    assert!(late.z < 0.0);
    assert!(late.x > 0.0); // Slide phase moved along +X
}

#[test]
fn empty_scene_has_no_objects() {
    let s = Scenario::empty_scene().unwrap();
    assert!(s.scene.is_empty());
}

#[test]
fn all_scenarios() {
    assert_eq!(ScenarioKind::all().len(), 4);
}

#[test]
fn trajectories_are_deterministic() {
    let a = Scenario::sphere_trace().unwrap();
    let b = Scenario::sphere_trace().unwrap();
    for t in [0, 17, 100, 719] {
        assert_eq!(a.device_position(t), b.device_position(t));
    }
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_plane_press() {
    let mut scenario = Scenario::plane_press().unwrap();
    scenario.ticks = 50; // Short run for testing
    let metrics = ServoRunner::run(scenario, AlgorithmKind::FingerProxy).unwrap();

    assert_eq!(metrics.scenario, "plane_press");
    assert_eq!(metrics.algorithm, "finger_proxy");
    assert_eq!(metrics.ticks, 50);
    assert!(metrics.total_wall_time > 0.0);
    // The press ends with the device inside the surface: spring loaded.
    assert!(metrics.final_force > 0.0);
    assert!(metrics.max_elongation > 0.0);
}

#[test]
fn run_empty_scene_is_forceless() {
    let mut scenario = Scenario::empty_scene().unwrap();
    scenario.ticks = 20;
    let metrics = ServoRunner::run(scenario, AlgorithmKind::FingerProxy).unwrap();

    assert_eq!(metrics.peak_force, 0.0);
    assert_eq!(metrics.final_force, 0.0);
    assert_eq!(metrics.max_elongation, 0.0);
}

#[test]
fn run_all_scenarios_both_algorithms() {
    for algorithm in [AlgorithmKind::FingerProxy, AlgorithmKind::PotentialField] {
        for &kind in ScenarioKind::all() {
            let mut scenario = Scenario::from_kind(kind).unwrap();
            scenario.ticks = 10; // Minimal for speed
            let metrics = ServoRunner::run(scenario, algorithm).unwrap();
            assert_eq!(metrics.scenario, kind.name());
            assert_eq!(metrics.ticks, 10);
        }
    }
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_output() {
    let metrics = ServoMetrics {
        scenario: "plane_press".into(),
        algorithm: "finger_proxy".into(),
        ticks: 500,
        total_wall_time: 0.12,
        avg_tick_time: 2.4e-4,
        min_tick_time: 1.0e-4,
        max_tick_time: 9.0e-4,
        overrun_count: 2,
        max_elongation: 0.02,
        peak_force: 9.5,
        final_force: 3.1,
    };

    let csv = ServoMetrics::to_csv(&[metrics]);
    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    let row = lines.next().unwrap();

    assert!(header.starts_with("scenario,algorithm,ticks"));
    assert!(row.starts_with("plane_press,finger_proxy,500"));
    assert_eq!(
        header.split(',').count(),
        row.split(',').count(),
        "header and row column counts must match"
    );
}
