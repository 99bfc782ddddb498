//! Error types for dataset construction and experiment execution.

use thiserror::Error;

/// Violations of the per-unit alignment contract, detected when a [`Dataset`] is built.
///
/// [`Dataset`]: crate::dataset::Dataset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("{field} has {actual} entries, expected {expected} (one per unit)")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("covariate row {unit} has width {actual}, expected {expected}")]
    RaggedCovariates {
        unit: usize,
        expected: usize,
        actual: usize,
    },

    #[error("treatment for unit {unit} is {value}, must lie in [0, 1]")]
    TreatmentOutOfRange { unit: usize, value: f64 },

    #[error("{field} contains a non-finite value at unit {unit}")]
    NonFinite { field: &'static str, unit: usize },
}

/// Failures raised by an [`Experiment`] run.
///
/// [`Experiment`]: crate::experiment::Experiment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExperimentError {
    #[error("invalid configuration for {experiment}: {reason}")]
    InvalidConfig {
        experiment: &'static str,
        reason: String,
    },

    #[error("experiment produced a malformed dataset: {0}")]
    InvalidDataset(#[from] DatasetError),

    #[error("simulation failed: {0}")]
    Simulation(String),
}

impl ExperimentError {
    pub fn invalid_config(experiment: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            experiment,
            reason: reason.into(),
        }
    }
}

/// Unknown simulator name passed to [`SimulatorKind::from_str`].
///
/// [`SimulatorKind::from_str`]: crate::registry::SimulatorKind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown simulator '{0}' (expected one of: contagion, peer-influence)")]
pub struct UnknownSimulator(pub String);
