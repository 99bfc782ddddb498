//! Estimators and a parallel trial driver for interference experiments.
//!
//! Runs experiments from `interference_core`, compares the naive
//! treated-vs-control estimate against simulator ground truth, and repeats the
//! comparison across many seeds on a worker pool.
//!
//! # Quick Start
//!
//! ```no_run
//! use interference_core::{get_experiment, SimulatorKind};
//! use interference_experiments::{compare, run_experiment_trials, TrialOptions};
//!
//! let experiment = get_experiment(&SimulatorKind::Contagion.default_config()).unwrap();
//!
//! // One run
//! let dataset = experiment.run(None, 0).unwrap();
//! println!("{}", compare(&dataset).unwrap());
//!
//! // Forty trials on four workers
//! let options = TrialOptions::new(40).with_workers(4);
//! let trials = run_experiment_trials(experiment.as_ref(), None, &options).unwrap();
//! println!("{trials}");
//! ```
//!
//! # Architecture
//!
//! - [`estimators`]: naive, difference-in-means and ground-truth estimators
//! - [`metrics`]: per-trial scalar summaries
//! - [`runner`]: repeated trials on a rayon pool
//! - [`report`]: console formatting
//! - [`export`]: CSV/JSON/Parquet export of trial summaries
//! - [`config`]: simulator configuration files

pub mod config;
pub mod error;
pub mod estimators;
pub mod export;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::{load_simulator_config, resolve_simulator_config};
pub use error::{ConfigError, EstimatorError, ExportError, TrialError};
pub use estimators::{
    compare, difference_in_means, ground_truth_effect, naive_effect, Aggregation,
    DifferenceInMeans, EffectComparison, GroundTruthEstimate, NaiveEstimate,
};
pub use export::{export_trials_to_csv, export_trials_to_json, export_trials_to_parquet};
pub use metrics::{summarize_trial, MeanSummary, TrialSummary};
pub use runner::{run_experiment_trials, run_trials, ExperimentTrials, TrialBatch, TrialOptions};
