//! Command-line entry point: run interference experiments and compare the
//! naive estimate with ground truth.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use interference_core::{get_experiment, SimulatorKind};
use interference_experiments::{
    compare, export_trials_to_csv, export_trials_to_json, export_trials_to_parquet,
    resolve_simulator_config, run_experiment_trials, TrialOptions,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "interference",
    about = "Demonstrate interference bias in randomized experiments",
    long_about = "Runs simulated randomized experiments in which units affect each other,\n\
                  and compares the naive treated-vs-control estimate with simulator ground truth."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available simulators
    List,
    /// Run one experiment and print naive and ground-truth effects
    Run {
        #[command(flatten)]
        target: Target,
        /// Seed for the run
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Run repeated trials (seeds 0..T) in parallel and print mean summaries
    Trials {
        #[command(flatten)]
        target: Target,
        /// Number of trials
        #[arg(long, short = 't', default_value_t = 20)]
        trials: usize,
        /// Worker threads (defaults to one per core)
        #[arg(long, short = 'w', env = "INTERFERENCE_WORKERS")]
        workers: Option<usize>,
        /// Write per-trial rows to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write per-trial rows to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
        /// Write per-trial rows to a Parquet file
        #[arg(long)]
        parquet: Option<PathBuf>,
        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

#[derive(Args)]
struct Target {
    /// Simulator to run (contagion, peer-influence)
    #[arg(long, short = 's')]
    simulator: Option<SimulatorKind>,
    /// JSON file with a tagged simulator configuration
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
    /// Override the number of units
    #[arg(long)]
    units: Option<usize>,
    /// Ground-truth replications (ignored by simulators with exact ground truth)
    #[arg(long, short = 'n')]
    num_samples: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for kind in SimulatorKind::ALL {
                let experiment = get_experiment(&kind.default_config())?;
                println!("{:<16} {}", kind, experiment.description());
            }
        }
        Commands::Run { target, seed } => {
            let config = resolve_simulator_config(
                target.simulator,
                target.config.as_deref(),
                target.units,
            )?;
            let experiment = get_experiment(&config)?;
            info!(experiment = experiment.name(), seed, "single run");

            let dataset = experiment.run(target.num_samples, seed)?;
            println!("--- {} (seed {}, {} units) ---", experiment.name(), seed, dataset.len());
            if dataset.is_binary_treatment() {
                println!(
                    "Treated units: {}, control units: {}",
                    dataset.treated_count(),
                    dataset.control_count()
                );
            }
            println!("{}", compare(&dataset)?);
        }
        Commands::Trials {
            target,
            trials,
            workers,
            csv,
            json,
            parquet,
            no_progress,
        } => {
            let config = resolve_simulator_config(
                target.simulator,
                target.config.as_deref(),
                target.units,
            )?;
            let experiment = get_experiment(&config)?;
            if target.num_samples.is_some() && !experiment.uses_num_samples() {
                eprintln!("note: {} ignores --num-samples", experiment.name());
            }

            let mut options = TrialOptions::new(trials).with_progress(!no_progress);
            if let Some(workers) = workers {
                options = options.with_workers(workers);
            }

            let results = run_experiment_trials(experiment.as_ref(), target.num_samples, &options)?;
            println!("{results}");

            if let Some(path) = csv {
                export_trials_to_csv(&results.summaries, &path)?;
                println!("Exported to {}", path.display());
            }
            if let Some(path) = json {
                export_trials_to_json(&results.summaries, &path)?;
                println!("Exported to {}", path.display());
            }
            if let Some(path) = parquet {
                export_trials_to_parquet(&results.summaries, &path)?;
                println!("Exported to {}", path.display());
            }
        }
    }

    Ok(())
}
