//! Servo metrics — data collected during a scenario run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a servo scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServoMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Force algorithm name.
    pub algorithm: String,
    /// Number of servo ticks executed.
    pub ticks: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per tick (seconds).
    pub avg_tick_time: f64,
    /// Minimum tick time.
    pub min_tick_time: f64,
    /// Maximum tick time.
    pub max_tick_time: f64,
    /// Ticks that exceeded the servo budget.
    pub overrun_count: u32,
    /// Maximum proxy–device spring elongation observed (meters).
    pub max_elongation: f32,
    /// Peak force magnitude (N).
    pub peak_force: f32,
    /// Force magnitude at the final tick (N).
    pub final_force: f32,
}

impl ServoMetrics {
    /// Format as a CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,algorithm,ticks,total_wall_time_s,avg_tick_us,min_tick_us,max_tick_us,overruns,max_elongation_m,peak_force_n,final_force_n".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{:.6},{:.2},{:.2},{:.2},{},{:.6},{:.4},{:.4}",
            self.scenario,
            self.algorithm,
            self.ticks,
            self.total_wall_time,
            self.avg_tick_time * 1.0e6,
            self.min_tick_time * 1.0e6,
            self.max_tick_time * 1.0e6,
            self.overrun_count,
            self.max_elongation,
            self.peak_force,
            self.final_force,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[ServoMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
