//! Per-trial summaries extracted from one experiment run.

use interference_core::Experiment;
use serde::Serialize;
use tracing::debug;

use crate::error::TrialError;
use crate::estimators::compare;

/// Number of scalar summaries recorded per trial.
pub const SUMMARY_WIDTH: usize = 4;

/// Scalar summaries of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialSummary {
    /// Seed the experiment was run with.
    pub seed: u64,
    /// Treatment-weighted outcome reduction.
    pub treated: f64,
    /// Control-weighted outcome reduction.
    pub control: f64,
    /// Naive relative effect, `treated / control`.
    pub naive_ratio: f64,
    /// Ground-truth headline: population ratio or mean isolated effect.
    pub ground_truth: f64,
}

impl TrialSummary {
    pub fn as_array(&self) -> [f64; SUMMARY_WIDTH] {
        [self.treated, self.control, self.naive_ratio, self.ground_truth]
    }

    pub fn from_array(seed: u64, values: [f64; SUMMARY_WIDTH]) -> Self {
        let [treated, control, naive_ratio, ground_truth] = values;
        Self {
            seed,
            treated,
            control,
            naive_ratio,
            ground_truth,
        }
    }
}

/// Per-field means over a batch of trials. Carries no seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanSummary {
    pub treated: f64,
    pub control: f64,
    pub naive_ratio: f64,
    pub ground_truth: f64,
}

impl From<[f64; SUMMARY_WIDTH]> for MeanSummary {
    fn from(values: [f64; SUMMARY_WIDTH]) -> Self {
        let [treated, control, naive_ratio, ground_truth] = values;
        Self {
            treated,
            control,
            naive_ratio,
            ground_truth,
        }
    }
}

/// Run `experiment` once with `seed` and reduce the dataset to a [`TrialSummary`].
pub fn summarize_trial(
    experiment: &dyn Experiment,
    num_samples: Option<usize>,
    seed: u64,
) -> Result<TrialSummary, TrialError> {
    let dataset = experiment.run(num_samples, seed)?;
    let comparison = compare(&dataset)?;

    debug!(
        experiment = experiment.name(),
        seed,
        naive_ratio = comparison.naive.ratio,
        ground_truth = comparison.ground_truth.value(),
        "trial summarized"
    );

    Ok(TrialSummary {
        seed,
        treated: comparison.naive.treated,
        control: comparison.naive.control,
        naive_ratio: comparison.naive.ratio,
        ground_truth: comparison.ground_truth.value(),
    })
}
