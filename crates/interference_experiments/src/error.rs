//! Error types for estimators, the trial driver, export and configuration.

use std::path::PathBuf;

use interference_core::{ExperimentError, SimulatorKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("treatments have {treatments} entries but outcomes have {outcomes}")]
    LengthMismatch { treatments: usize, outcomes: usize },

    #[error("cannot estimate an effect from zero units")]
    Empty,

    /// The control-weighted reduction is zero, so the relative effect is undefined.
    #[error("control-weighted total is zero; relative effect is undefined")]
    ZeroControl,

    #[error("treatment for unit {unit} is {value}; difference in means needs binary treatments")]
    NonBinaryTreatment { unit: usize, value: f64 },

    #[error("the {arm} arm has no units")]
    EmptyArm { arm: &'static str },
}

#[derive(Debug, Error)]
pub enum TrialError {
    #[error("trial count must be positive")]
    NoTrials,

    #[error("worker count must be positive")]
    NoWorkers,

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("trial with seed {seed} failed: {source}")]
    Trial {
        seed: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no results to export")]
    Empty,

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow batch construction failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet export failed: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("requested simulator {requested} but {path} configures {found}")]
    SimulatorMismatch {
        path: PathBuf,
        requested: SimulatorKind,
        found: SimulatorKind,
    },
}
