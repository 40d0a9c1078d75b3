//! Tactus CLI — servo benchmarks, mesh validation, and inspection.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tactus")]
#[command(version, about = "Tactus — haptic rendering core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run servo benchmark scenarios.
    Bench {
        /// Which scenario to run (plane_press, tangential_slide,
        /// sphere_trace, empty_scene, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Force algorithm (proxy, potential).
        #[arg(short, long, default_value = "proxy")]
        algorithm: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a mesh or force configuration file.
    Validate {
        /// Path to mesh (.json) or config (.toml) file.
        path: String,
    },

    /// Print geometry statistics for a mesh file.
    Inspect {
        /// Path to mesh (.json) file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bench {
            scenario,
            algorithm,
            output,
        } => commands::bench(&scenario, &algorithm, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Inspect { path } => commands::inspect(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
