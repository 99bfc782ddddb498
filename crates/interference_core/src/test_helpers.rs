//! Test helpers: stub experiments with fully known output.
//!
//! These stand in for real simulators in estimator and trial-driver tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::dataset::{Dataset, TrueEffects};
use crate::error::ExperimentError;
use crate::experiment::Experiment;

/// Treatments used by the four-unit reference scenario.
pub const SCENARIO_TREATMENTS: [f64; 4] = [1.0, 0.0, 1.0, 0.0];
/// Outcomes used by the four-unit reference scenario.
pub const SCENARIO_OUTCOMES: [f64; 4] = [10.0, 20.0, 30.0, 40.0];

/// Returns the same dataset for every seed and sample count.
#[derive(Debug)]
pub struct FixedExperiment {
    dataset: Dataset,
    calls: AtomicUsize,
}

impl FixedExperiment {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            calls: AtomicUsize::new(0),
        }
    }

    /// Four units, treatments `[1, 0, 1, 0]`, outcomes `[10, 20, 30, 40]`, and a
    /// counterfactual pair whose totals are 400 (all treated) and 40 (all control).
    pub fn scenario() -> Self {
        let dataset = Dataset::new(
            vec![vec![]; 4],
            SCENARIO_TREATMENTS.to_vec(),
            SCENARIO_OUTCOMES.to_vec(),
            TrueEffects::Counterfactual {
                treated: vec![100.0; 4],
                control: vec![10.0; 4],
            },
        )
        .expect("scenario dataset is well-formed");
        Self::new(dataset)
    }

    /// Number of times [`Experiment::run`] has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Experiment for FixedExperiment {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn description(&self) -> &'static str {
        "Stub experiment returning a fixed dataset"
    }

    fn uses_num_samples(&self) -> bool {
        false
    }

    fn run(&self, _num_samples: Option<usize>, _seed: u64) -> Result<Dataset, ExperimentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.dataset.clone())
    }
}

/// Fails on one seed, otherwise delegates to an inner experiment.
#[derive(Debug)]
pub struct FailingExperiment<E> {
    inner: E,
    failing_seed: u64,
}

impl<E: Experiment> FailingExperiment<E> {
    pub fn new(inner: E, failing_seed: u64) -> Self {
        Self {
            inner,
            failing_seed,
        }
    }
}

impl<E: Experiment> Experiment for FailingExperiment<E> {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn description(&self) -> &'static str {
        "Stub experiment that fails on a chosen seed"
    }

    fn uses_num_samples(&self) -> bool {
        self.inner.uses_num_samples()
    }

    fn run(&self, num_samples: Option<usize>, seed: u64) -> Result<Dataset, ExperimentError> {
        if seed == self.failing_seed {
            return Err(ExperimentError::Simulation(format!(
                "injected failure at seed {seed}"
            )));
        }
        self.inner.run(num_samples, seed)
    }
}

/// Scales every outcome by `1 + seed`, so trials are distinguishable by seed.
#[derive(Debug)]
pub struct SeedScaledExperiment {
    base: Dataset,
}

impl SeedScaledExperiment {
    pub fn new(base: Dataset) -> Self {
        Self { base }
    }
}

impl Experiment for SeedScaledExperiment {
    fn name(&self) -> &'static str {
        "seed-scaled"
    }

    fn description(&self) -> &'static str {
        "Stub experiment whose outcomes grow with the seed"
    }

    fn uses_num_samples(&self) -> bool {
        false
    }

    fn run(&self, _num_samples: Option<usize>, seed: u64) -> Result<Dataset, ExperimentError> {
        let factor = 1.0 + seed as f64;
        let (covariates, treatments, outcomes, true_effects) = self.base.clone().into_parts();
        let scale =
            |values: Vec<f64>| -> Vec<f64> { values.into_iter().map(|v| v * factor).collect() };
        let true_effects = match true_effects {
            TrueEffects::Counterfactual { treated, control } => TrueEffects::Counterfactual {
                treated: scale(treated),
                control: scale(control),
            },
            TrueEffects::Isolated(effects) => TrueEffects::Isolated(scale(effects)),
        };
        Ok(Dataset::new(
            covariates,
            treatments,
            scale(outcomes),
            true_effects,
        )?)
    }
}
