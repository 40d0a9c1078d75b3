//! Servo runner — drives a tool through a scenario and collects metrics.

use std::time::Instant;

use tactus_force::{AlgorithmKind, HapticTool};
use tactus_types::TactusResult;

use crate::metrics::ServoMetrics;
use crate::scenarios::Scenario;

/// Runs servo scenarios and collects metrics.
pub struct ServoRunner;

impl ServoRunner {
    /// Run a single scenario with the given force algorithm.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: Scenario, algorithm: AlgorithmKind) -> TactusResult<ServoMetrics> {
        // Precompute the trajectory before the scene moves into the tool.
        let positions: Vec<_> = (0..scenario.ticks)
            .map(|t| scenario.device_position(t))
            .collect();
        let kind = scenario.kind;
        let ticks = scenario.ticks;
        let budget_us = scenario.config.tick_budget_us;

        let mut tool = HapticTool::new(scenario.scene, scenario.config);
        tool.set_algorithm(algorithm);
        if let Some(&start) = positions.first() {
            tool.initialize(start);
        }

        let mut tick_times: Vec<f64> = Vec::with_capacity(ticks as usize);
        let mut overruns = 0u32;
        let mut max_elongation = 0.0f32;
        let mut peak_force = 0.0f32;
        let mut final_force = 0.0f32;

        let total_start = Instant::now();

        for &device in &positions {
            let interaction = tool.compute_interaction(device)?;
            tick_times.push(interaction.wall_time);
            if interaction.wall_time * 1.0e6 > budget_us as f64 {
                overruns += 1;
            }
            let elongation = (interaction.proxy_position - device).length();
            max_elongation = max_elongation.max(elongation);
            let force = interaction.force.length();
            peak_force = peak_force.max(force);
            final_force = force;
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        tool.bus_mut().flush();

        let avg_tick = if tick_times.is_empty() {
            0.0
        } else {
            tick_times.iter().sum::<f64>() / tick_times.len() as f64
        };
        let min_tick = tick_times.iter().copied().fold(f64::MAX, f64::min);
        let max_tick = tick_times.iter().copied().fold(0.0, f64::max);

        let algorithm_name = match algorithm {
            AlgorithmKind::FingerProxy => "finger_proxy",
            AlgorithmKind::PotentialField => "potential_field",
        };

        Ok(ServoMetrics {
            scenario: kind.name().to_string(),
            algorithm: algorithm_name.to_string(),
            ticks,
            total_wall_time,
            avg_tick_time: avg_tick,
            min_tick_time: if tick_times.is_empty() { 0.0 } else { min_tick },
            max_tick_time: max_tick,
            overrun_count: overruns,
            max_elongation,
            peak_force,
            final_force,
        })
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(algorithm: AlgorithmKind) -> TactusResult<Vec<ServoMetrics>> {
        use crate::scenarios::ScenarioKind;
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind)?;
            results.push(Self::run(scenario, algorithm)?);
        }
        Ok(results)
    }
}
