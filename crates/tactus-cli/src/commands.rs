//! CLI command implementations.

use tactus_bench::metrics::ServoMetrics;
use tactus_bench::runner::ServoRunner;
use tactus_bench::scenarios::{Scenario, ScenarioKind};
use tactus_force::AlgorithmKind;
use tactus_math::Aabb;

/// Run the servo benchmark suite.
pub fn bench(
    scenario_name: &str,
    algorithm_name: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tactus Servo Benchmarks");
    println!("═══════════════════════");
    println!();

    let algorithm = match algorithm_name {
        "proxy" => AlgorithmKind::FingerProxy,
        "potential" => AlgorithmKind::PotentialField,
        other => {
            eprintln!("Unknown algorithm: {other}");
            eprintln!("Available: proxy, potential");
            return Err("Unknown algorithm".into());
        }
    };

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        let kind = match scenario_name {
            "plane_press" => ScenarioKind::PlanePress,
            "tangential_slide" => ScenarioKind::TangentialSlide,
            "sphere_trace" => ScenarioKind::SphereTrace,
            "empty_scene" => ScenarioKind::EmptyScene,
            other => {
                eprintln!("Unknown scenario: {other}");
                eprintln!(
                    "Available: plane_press, tangential_slide, sphere_trace, empty_scene, all"
                );
                return Err("Unknown scenario".into());
            }
        };
        vec![kind]
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind)?;

        println!(
            "Running: {} ({} ticks, {})",
            kind.name(),
            scenario.ticks,
            algorithm_name,
        );

        let metrics = ServoRunner::run(scenario, algorithm)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg tick:      {:.1}µs", metrics.avg_tick_time * 1.0e6);
        println!("  Overruns:      {}", metrics.overrun_count);
        println!("  Peak force:    {:.3}N", metrics.peak_force);
        println!();

        all_metrics.push(metrics);
    }

    if let Some(path) = output_path {
        let csv = ServoMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", ServoMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Validate a mesh or force configuration.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tactus Validator");
    println!("────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        let config: tactus_force::ForceConfig = toml::from_str(&content)?;
        config.validate()?;
        println!("Config is valid.");
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: tactus_mesh::Mesh = serde_json::from_str(&content)?;
        match mesh.validate() {
            Ok(()) => println!(
                "Mesh is valid ({} verts, {} tris).",
                mesh.vertex_count(),
                mesh.alive_triangle_count()
            ),
            Err(e) => println!("Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (mesh).");
    }

    Ok(())
}

/// Print geometry statistics for a mesh file.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tactus Mesh Inspector");
    println!("─────────────────────");
    println!();

    let content = std::fs::read_to_string(path)?;
    let mesh: tactus_mesh::Mesh = serde_json::from_str(&content)?;

    println!("Revision:     {}", mesh.revision());
    println!("Vertices:     {}", mesh.vertex_count());
    println!("Triangles:    {} alive / {} total", mesh.alive_triangle_count(), mesh.triangle_count());

    if mesh.vertex_count() > 0 {
        let mut bounds = Aabb::empty();
        for i in 0..mesh.vertex_count() {
            bounds.expand_point(mesh.position(i));
        }
        println!(
            "Bounds min:   [{:.4}, {:.4}, {:.4}]",
            bounds.min.x, bounds.min.y, bounds.min.z
        );
        println!(
            "Bounds max:   [{:.4}, {:.4}, {:.4}]",
            bounds.max.x, bounds.max.y, bounds.max.z
        );
    }

    Ok(())
}
